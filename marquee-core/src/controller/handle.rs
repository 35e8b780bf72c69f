//! Handle for communicating with the query controller actor.

use tokio::sync::{mpsc, oneshot};

use super::commands::{QueryControllerCommand, SearchSnapshot};
use crate::errors::SearchError;
use crate::scroll::ViewportMetrics;
use crate::types::MediaTypeFilter;

/// Handle for communicating with the query controller actor.
///
/// Provides an ergonomic async API for sending commands to the actor. It
/// can be cloned and shared across tasks safely.
#[derive(Debug, Clone)]
pub struct QueryControllerHandle {
    sender: mpsc::Sender<QueryControllerCommand>,
}

impl QueryControllerHandle {
    /// Creates a new handle with the given command sender.
    pub fn new(sender: mpsc::Sender<QueryControllerCommand>) -> Self {
        Self { sender }
    }

    /// Replaces the free-text query input.
    ///
    /// An empty (or whitespace-only) text switches to Discovery mode and
    /// fetches immediately; anything else arms the debounce timer.
    ///
    /// # Errors
    /// - `SearchError::ControllerShutdown` - Actor is no longer running
    pub async fn set_query_text(&self, text: impl Into<String>) -> Result<(), SearchError> {
        let (responder, rx) = oneshot::channel();
        let cmd = QueryControllerCommand::SetQueryText {
            text: text.into(),
            responder,
        };

        self.sender
            .send(cmd)
            .await
            .map_err(|_| SearchError::ControllerShutdown)?;

        rx.await.map_err(|_| SearchError::ControllerShutdown)
    }

    /// Sets or clears the media type filter, refetching page 1
    /// immediately.
    ///
    /// # Errors
    /// - `SearchError::ControllerShutdown` - Actor is no longer running
    pub async fn set_media_type(
        &self,
        media_type: Option<MediaTypeFilter>,
    ) -> Result<(), SearchError> {
        let (responder, rx) = oneshot::channel();
        let cmd = QueryControllerCommand::SetMediaType {
            media_type,
            responder,
        };

        self.sender
            .send(cmd)
            .await
            .map_err(|_| SearchError::ControllerShutdown)?;

        rx.await.map_err(|_| SearchError::ControllerShutdown)
    }

    /// Sets or clears the year filter, refetching page 1 immediately.
    ///
    /// # Errors
    /// - `SearchError::ControllerShutdown` - Actor is no longer running
    pub async fn set_year(&self, year: Option<String>) -> Result<(), SearchError> {
        let (responder, rx) = oneshot::channel();
        let cmd = QueryControllerCommand::SetYear { year, responder };

        self.sender
            .send(cmd)
            .await
            .map_err(|_| SearchError::ControllerShutdown)?;

        rx.await.map_err(|_| SearchError::ControllerShutdown)
    }

    /// Reports a scroll position. Returns true when the controller
    /// requested the next page in response.
    ///
    /// # Errors
    /// - `SearchError::ControllerShutdown` - Actor is no longer running
    pub async fn report_scroll(&self, metrics: ViewportMetrics) -> Result<bool, SearchError> {
        let (responder, rx) = oneshot::channel();
        let cmd = QueryControllerCommand::ReportScroll { metrics, responder };

        self.sender
            .send(cmd)
            .await
            .map_err(|_| SearchError::ControllerShutdown)?;

        rx.await.map_err(|_| SearchError::ControllerShutdown)
    }

    /// Resets query text, filters, and results, then refetches Discovery
    /// content with a freshly drawn keyword.
    ///
    /// # Errors
    /// - `SearchError::ControllerShutdown` - Actor is no longer running
    pub async fn clear(&self) -> Result<(), SearchError> {
        let (responder, rx) = oneshot::channel();
        let cmd = QueryControllerCommand::Clear { responder };

        self.sender
            .send(cmd)
            .await
            .map_err(|_| SearchError::ControllerShutdown)?;

        rx.await.map_err(|_| SearchError::ControllerShutdown)
    }

    /// Gets a point-in-time view of the search state.
    ///
    /// # Errors
    /// - `SearchError::ControllerShutdown` - Actor is no longer running
    pub async fn snapshot(&self) -> Result<SearchSnapshot, SearchError> {
        let (responder, rx) = oneshot::channel();
        let cmd = QueryControllerCommand::GetSnapshot { responder };

        self.sender
            .send(cmd)
            .await
            .map_err(|_| SearchError::ControllerShutdown)?;

        rx.await.map_err(|_| SearchError::ControllerShutdown)
    }

    /// Shuts down the controller actor gracefully.
    ///
    /// # Errors
    /// - `SearchError::ControllerShutdown` - Actor already stopped
    pub async fn shutdown(&self) -> Result<(), SearchError> {
        let (responder, rx) = oneshot::channel();
        let cmd = QueryControllerCommand::Shutdown { responder };

        self.sender
            .send(cmd)
            .await
            .map_err(|_| SearchError::ControllerShutdown)?;

        rx.await.map_err(|_| SearchError::ControllerShutdown)
    }

    /// True while the actor is still accepting commands.
    pub fn is_running(&self) -> bool {
        !self.sender.is_closed()
    }
}
