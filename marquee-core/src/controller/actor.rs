//! Actor implementation for the query controller.

use std::sync::Arc;

use tokio::sync::mpsc;

use super::commands::QueryControllerCommand;
use super::core::QueryController;
use super::handle::QueryControllerHandle;
use crate::config::MarqueeConfig;
use crate::provider::MetadataSearchProvider;

/// Spawns the query controller actor and returns its handle.
///
/// The actor issues the initial Discovery fetch immediately (mount
/// semantics), then processes commands sequentially: user events through
/// the handle's channel, timer expiries and fetch settlements through the
/// internal channel. Sequential processing serializes all state mutation
/// while the fetches themselves overlap in spawned tasks.
pub fn spawn_query_controller(
    config: MarqueeConfig,
    provider: Arc<dyn MetadataSearchProvider>,
) -> QueryControllerHandle {
    let (sender, receiver) = mpsc::channel(64);
    let (internal_sender, internal_receiver) = mpsc::unbounded_channel();
    let controller = QueryController::new(config, provider, internal_sender);

    tokio::spawn(async move {
        run_actor_loop(controller, receiver, internal_receiver).await;
    });

    QueryControllerHandle::new(sender)
}

/// Runs the main actor message processing loop.
///
/// The loop continues until the command channel closes or a shutdown
/// command is received.
async fn run_actor_loop(
    mut controller: QueryController,
    mut receiver: mpsc::Receiver<QueryControllerCommand>,
    mut internal_receiver: mpsc::UnboundedReceiver<QueryControllerCommand>,
) {
    tracing::debug!("Query controller actor started");
    controller.start();

    loop {
        tokio::select! {
            Some(command) = receiver.recv() => {
                if !handle_command(&mut controller, command) {
                    break;
                }
            }
            Some(command) = internal_receiver.recv() => {
                if !handle_command(&mut controller, command) {
                    break;
                }
            }
            else => break,
        }
    }

    tracing::debug!("Query controller actor stopped");
}

/// Handles a single command for the controller.
/// Returns true to continue processing, false to shutdown.
fn handle_command(controller: &mut QueryController, command: QueryControllerCommand) -> bool {
    match command {
        QueryControllerCommand::SetQueryText { text, responder } => {
            controller.set_query_text(text);
            let _ = responder.send(());
        }

        QueryControllerCommand::SetMediaType {
            media_type,
            responder,
        } => {
            controller.set_media_type(media_type);
            let _ = responder.send(());
        }

        QueryControllerCommand::SetYear { year, responder } => {
            controller.set_year(year);
            let _ = responder.send(());
        }

        QueryControllerCommand::ReportScroll { metrics, responder } => {
            let advanced = controller.report_scroll(&metrics);
            let _ = responder.send(advanced);
        }

        QueryControllerCommand::Clear { responder } => {
            controller.clear();
            let _ = responder.send(());
        }

        QueryControllerCommand::GetSnapshot { responder } => {
            let _ = responder.send(controller.snapshot());
        }

        QueryControllerCommand::Shutdown { responder } => {
            tracing::debug!("Query controller actor shutting down");
            let _ = responder.send(());
            return false;
        }

        QueryControllerCommand::DebounceElapsed { generation } => {
            controller.debounce_elapsed(generation);
        }

        QueryControllerCommand::FetchSettled {
            seq,
            request,
            outcome,
        } => {
            controller.fetch_settled(seq, request, outcome);
        }
    }
    true
}
