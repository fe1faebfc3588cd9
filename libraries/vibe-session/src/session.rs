//! Event session: the owning scope for one open event view.

use std::sync::Arc;

use tracing::{debug, info, warn};
use vibe_core::{LifecycleState, RequestId};
use vibe_queue_hub::{HubSubscription, IncomingSong, QueueHub};
use vibe_server_client::EventDetails;

use crate::authority::RequestAuthority;
use crate::error::{Result, SessionError};
use crate::timer::{FixedPlaybackTimer, PlaybackTimer};
use crate::view::EventView;

/// One open event, from snapshot fetch to teardown.
///
/// The session exclusively owns the [`EventView`] and the queue hub
/// subscription scoped to it. Every lifecycle transition is an
/// all-or-nothing remote call: the view is mutated only after the
/// authority confirms, in a single step, using the confirmed record
/// rather than the cached copy. A failed call leaves the view exactly
/// as it was.
pub struct EventSession {
    view: EventView,
    authority: Arc<dyn RequestAuthority>,
    timer: Arc<dyn PlaybackTimer>,
    subscription: Option<HubSubscription>,
    closed: bool,
}

impl EventSession {
    /// Open a session over a fetched event snapshot, subscribing to the
    /// event's queue hub group.
    pub async fn open(
        details: EventDetails,
        authority: Arc<dyn RequestAuthority>,
        hub: &dyn QueueHub,
    ) -> Result<Self> {
        let view = EventView::from_details(details);
        let subscription = hub.subscribe(&view.event_id).await?;
        info!(event_id = %view.event_id, "Opened event session");

        Ok(Self::from_parts(
            view,
            authority,
            Arc::new(FixedPlaybackTimer::default()),
            Some(subscription),
        ))
    }

    /// Assemble a session from its parts. Lets callers inject a timer
    /// and a hand-built subscription.
    pub fn from_parts(
        view: EventView,
        authority: Arc<dyn RequestAuthority>,
        timer: Arc<dyn PlaybackTimer>,
        subscription: Option<HubSubscription>,
    ) -> Self {
        Self {
            view,
            authority,
            timer,
            subscription,
            closed: false,
        }
    }

    /// The current event view.
    pub fn view(&self) -> &EventView {
        &self.view
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Accept a queued request onto the playlist.
    ///
    /// The confirmed record returned by the authority is what lands on
    /// the playlist. Fails without mutation if the request is not
    /// queued or the call fails.
    pub async fn accept(&mut self, request_id: &RequestId) -> Result<()> {
        self.ensure_open()?;
        if !self.view.is_queued(request_id) {
            return Err(SessionError::Stale(format!(
                "request {request_id} is not in the queue"
            )));
        }

        let row = self
            .authority
            .mark_accepted(&self.view.event_id, request_id)
            .await?;
        self.ensure_open()?;

        let confirmed = row.into_request(LifecycleState::Accepted);
        if self.view.promote_to_playlist(request_id, confirmed) {
            debug!(request_id = %request_id, "Request accepted onto playlist");
            Ok(())
        } else {
            Err(SessionError::Stale(format!(
                "request {request_id} left the queue while accepting"
            )))
        }
    }

    /// Reject a queued request, moving it to the head of history.
    pub async fn reject(&mut self, request_id: &RequestId) -> Result<()> {
        self.ensure_open()?;
        if !self.view.is_queued(request_id) {
            return Err(SessionError::Stale(format!(
                "request {request_id} is not in the queue"
            )));
        }

        let row = self
            .authority
            .mark_rejected(&self.view.event_id, request_id)
            .await?;
        self.ensure_open()?;

        let confirmed = row.into_request(LifecycleState::Rejected);
        if self.view.retire_from_queue(request_id, confirmed) {
            debug!(request_id = %request_id, "Request rejected");
            Ok(())
        } else {
            Err(SessionError::Stale(format!(
                "request {request_id} left the queue while rejecting"
            )))
        }
    }

    /// Begin playback of an accepted playlist entry.
    ///
    /// At most one request per event plays at a time; starting a second
    /// one is a stale-state error.
    pub async fn start_playing(&mut self, request_id: &RequestId) -> Result<()> {
        self.ensure_open()?;
        match self.view.playlist_entry(request_id) {
            Some(entry) if entry.state == LifecycleState::Accepted => {}
            Some(_) => {
                return Err(SessionError::Stale(format!(
                    "request {request_id} is not awaiting playback"
                )))
            }
            None => {
                return Err(SessionError::Stale(format!(
                    "request {request_id} is not on the playlist"
                )))
            }
        }
        if let Some(playing) = self.view.playing() {
            return Err(SessionError::Stale(format!(
                "request {} is already playing",
                playing.id
            )));
        }

        self.authority
            .mark_playing(&self.view.event_id, request_id)
            .await?;
        self.ensure_open()?;

        if self.view.mark_playing(request_id) {
            debug!(request_id = %request_id, "Playback started");
            Ok(())
        } else {
            Err(SessionError::Stale(format!(
                "request {request_id} left the playlist while starting playback"
            )))
        }
    }

    /// Finish playback of the playing request, crediting its payment
    /// to the running total.
    ///
    /// On failure the entry stays on the playlist in the playing state
    /// for manual recovery; the countdown is not restarted.
    pub async fn finish_playing(&mut self, request_id: &RequestId) -> Result<()> {
        self.ensure_open()?;
        match self.view.playlist_entry(request_id) {
            Some(entry) if entry.state == LifecycleState::Playing => {}
            _ => {
                return Err(SessionError::Stale(format!(
                    "request {request_id} is not playing"
                )))
            }
        }

        let finished = self
            .authority
            .mark_finished(&self.view.event_id, request_id)
            .await?;
        self.ensure_open()?;

        let payment = finished.payment.converted_amount;
        let confirmed = finished.song.into_request(LifecycleState::Finished);
        if self.view.retire_from_playlist(request_id, confirmed, payment) {
            debug!(request_id = %request_id, payment, "Playback finished");
            Ok(())
        } else {
            Err(SessionError::Stale(format!(
                "request {request_id} left the playlist while finishing"
            )))
        }
    }

    /// Play an accepted request through one playback window: start it,
    /// wait out the countdown, then finish it.
    pub async fn play_through(&mut self, request_id: &RequestId) -> Result<()> {
        self.start_playing(request_id).await?;
        let timer = Arc::clone(&self.timer);
        timer.wait().await;
        self.finish_playing(request_id).await
    }

    /// Fold one hub push into the queue.
    ///
    /// Always appends to the queue tail regardless of which part of the
    /// view is in use. Pushes for an already-known id are appended as
    /// delivered; the hub is trusted not to resend ids. Deliveries
    /// after close are discarded.
    pub fn ingest_incoming(&mut self, song: IncomingSong) {
        if self.closed {
            debug!(request_id = %song.id, "Discarding push after teardown");
            return;
        }
        debug!(request_id = %song.id, "New request entered queue");
        self.view.push_queued(song.into_request());
    }

    /// Fold every already-delivered hub push into the queue. Returns
    /// the number ingested.
    pub fn drain_incoming(&mut self) -> usize {
        let mut ingested = 0;
        while let Some(song) = self
            .subscription
            .as_mut()
            .and_then(HubSubscription::try_recv)
        {
            self.ingest_incoming(song);
            ingested += 1;
        }
        ingested
    }

    /// Wait for the next hub push and fold it into the queue. Returns
    /// false once the subscription has ended.
    pub async fn recv_incoming(&mut self) -> bool {
        let Some(subscription) = self.subscription.as_mut() else {
            return false;
        };
        match subscription.recv().await {
            Some(song) => {
                self.ingest_incoming(song);
                true
            }
            None => false,
        }
    }

    /// Tear the session down: leave the hub group first, so no further
    /// pushes reach the view, then mark the session closed. Operations
    /// still in flight find the session closed on completion and
    /// discard their results. Closing twice is harmless.
    pub async fn close(&mut self) {
        if self.closed {
            return;
        }
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe().await;
        }
        self.closed = true;
        info!(event_id = %self.view.event_id, "Closed event session");
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            warn!(event_id = %self.view.event_id, "Operation on closed session");
            return Err(SessionError::Closed);
        }
        Ok(())
    }
}
