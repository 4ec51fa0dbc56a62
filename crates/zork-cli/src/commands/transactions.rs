use anyhow::{Context as _, Result};
use serde::Serialize;
use zork_core::models::Direction;
use zork_core::{Transaction, TransactionFilter};

use super::Context;
use crate::utils::{format_date, format_zorks, truncate_string};

/// Width of the description column
const DESCRIPTION_WIDTH: usize = 32;

#[derive(Serialize)]
struct TransactionOutput<'a> {
    #[serde(flatten)]
    transaction: &'a Transaction,
    direction: &'static str,
}

fn direction_label(direction: Direction) -> &'static str {
    match direction {
        Direction::Sent => "sent",
        Direction::Received => "received",
        Direction::Unrelated => "other",
    }
}

pub async fn run(ctx: &Context, sent: bool, received: bool, json: bool) -> Result<()> {
    let (credential, profile) = ctx.require_user().await?;

    let transactions = ctx
        .api
        .fetch_transactions(&credential, "self")
        .await
        .context("Failed to fetch transactions")?;
    let filter = TransactionFilter { sent, received };
    let shown = filter.apply(&transactions, profile.id);

    if json {
        let output: Vec<TransactionOutput> = shown
            .iter()
            .map(|t| TransactionOutput {
                transaction: t,
                direction: direction_label(t.direction_for(profile.id)),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Your latest Zork transactions");
    if shown.is_empty() {
        println!("  No transactions to show");
        return Ok(());
    }

    for t in &shown {
        let direction = t.direction_for(profile.id);
        let amount = match direction {
            Direction::Sent => -t.amount,
            _ => t.amount,
        };
        let counterpart = match direction {
            Direction::Sent => format!("to #{}", t.to_id),
            _ => format!("from #{}", t.from_id),
        };
        println!(
            "  {:<12} {:>16}  {:<12} {}",
            t.created_at.as_deref().map(format_date).unwrap_or_default(),
            format_zorks(amount),
            counterpart,
            truncate_string(t.description.as_deref().unwrap_or(""), DESCRIPTION_WIDTH),
        );
    }
    Ok(())
}
