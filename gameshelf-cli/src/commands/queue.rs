use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gameshelf_catalog::{GameId, GameRecord};
use gameshelf_collection::{CollectionStore, PlayQueue, QueueDisplay};
use gameshelf_db::LocalGateway;

use super::{Context, game_line, success, warning};
use crate::cli_types::QueueAction;
use crate::error::CliError;

pub(crate) async fn run_queue(
    ctx: &Context,
    action: Option<QueueAction>,
    show_hidden: bool,
) -> Result<(), CliError> {
    let mut store = ctx.signed_in_store().await?;
    let mut queue = PlayQueue::new();
    queue.set_show_hidden(show_hidden);

    match action.unwrap_or(QueueAction::Show) {
        QueueAction::Show => {}
        QueueAction::Move { id, position } => {
            let target = position.max(1) - 1;
            match store.reorder_queue(&queue, id, target).await? {
                None => log::info!("Already at position {}.", position.max(1)),
                Some(outcome) if outcome.is_complete() => {
                    success(format!("Moved #{} to position {}", id, target + 1));
                }
                Some(outcome) => {
                    for (failed, e) in &outcome.failed {
                        warning(format!("Could not save position of #{}: {}", failed, e));
                    }
                    return Err(CliError::other(format!(
                        "{} of {} queue positions failed to save",
                        outcome.failed.len(),
                        outcome.order.len()
                    )));
                }
            }
        }
        QueueAction::Hide { id } => set_hidden(&mut store, &queue, id, true).await?,
        QueueAction::Unhide { id } => set_hidden(&mut store, &queue, id, false).await?,
    }

    print_queue(&queue, store.records());
    Ok(())
}

async fn set_hidden(
    store: &mut CollectionStore<LocalGateway>,
    queue: &PlayQueue,
    id: GameId,
    hidden: bool,
) -> Result<(), CliError> {
    let current = store
        .get(id)
        .map(|g| g.is_hidden_in_queue)
        .ok_or_else(|| CliError::other(format!("Game {} not found", id)))?;
    if current == hidden {
        log::info!(
            "#{} is already {}.",
            id,
            if hidden { "hidden" } else { "visible" }
        );
        return Ok(());
    }
    store.toggle_queue_hidden(queue, id).await?;
    success(format!(
        "#{} is now {} in the queue",
        id,
        if hidden { "hidden" } else { "visible" }
    ));
    Ok(())
}

fn print_queue(queue: &PlayQueue, records: &[GameRecord]) {
    log::info!("");
    match queue.display(records) {
        QueueDisplay::Empty => {
            log::info!("Your queue is empty. Games marked Pendiente show up here.");
        }
        QueueDisplay::AllHidden { hidden } => {
            log::info!(
                "All {} queued games are hidden. Use --show-hidden to see them.",
                hidden
            );
        }
        QueueDisplay::Items(items) => {
            log::info!("{}", "Play queue".if_supports_color(Stdout, |t| t.bold()));
            for (i, game) in items.iter().enumerate() {
                let hidden = if game.is_hidden_in_queue {
                    format!(" {}", "(hidden)".if_supports_color(Stdout, |t| t.dimmed()))
                } else {
                    String::new()
                };
                log::info!("  {:>3}. {}{}", i + 1, game_line(game), hidden);
            }
        }
    }
}
