//! Local view of one event's request state.

use std::collections::VecDeque;

use vibe_core::{EventId, LifecycleState, RequestId, SongRequest};
use vibe_server_client::EventDetails;

/// One event's request state as observed by this client.
///
/// Three disjoint ordered buckets hold every known request: `queue`
/// (awaiting a decision, arrival order), `playlist` (accepted,
/// acceptance order, including the one currently playing) and `history`
/// (terminal, most-recent-first). A request id lives in exactly one
/// bucket from the moment it is first observed until the view is torn
/// down.
#[derive(Debug, Clone)]
pub struct EventView {
    pub event_id: EventId,
    pub title: String,
    pub is_active: bool,
    pub min_price: f64,
    /// Shareable join code
    pub code: Option<String>,
    pub image_url: Option<String>,
    /// Running earnings total; only ever increased, and only by a
    /// request finishing playback with a reported payment.
    pub total_amount: f64,
    queue: VecDeque<SongRequest>,
    playlist: Vec<SongRequest>,
    history: VecDeque<SongRequest>,
}

impl EventView {
    /// Seed the view from a full event snapshot.
    ///
    /// Queue rows arrive in submission order and history rows
    /// most-recent-first, so bucket order is taken as delivered.
    pub fn from_details(details: EventDetails) -> Self {
        let queue = details
            .queue
            .into_iter()
            .map(|row| row.into_request(LifecycleState::Queued))
            .collect();
        let playlist = details
            .playlist
            .into_iter()
            .map(|row| row.into_request(LifecycleState::Accepted))
            .collect();
        let history = details
            .history
            .into_iter()
            .map(vibe_server_client::SongRow::into_history_request)
            .collect();

        Self {
            event_id: EventId::new(details.event.id),
            title: details.event.name,
            is_active: details.event.is_active,
            min_price: details.event.min_price,
            code: details.event.code,
            image_url: details.event.image_url,
            total_amount: details.total_earnings,
            queue,
            playlist,
            history,
        }
    }

    /// Requests awaiting an accept/reject decision, in arrival order.
    pub fn queue(&self) -> impl Iterator<Item = &SongRequest> {
        self.queue.iter()
    }

    /// Accepted requests in acceptance order, including the playing one.
    pub fn playlist(&self) -> impl Iterator<Item = &SongRequest> {
        self.playlist.iter()
    }

    /// Terminal requests, most recent first.
    pub fn history(&self) -> impl Iterator<Item = &SongRequest> {
        self.history.iter()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn playlist_len(&self) -> usize {
        self.playlist.len()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Whether the queue holds the given request.
    pub fn is_queued(&self, request_id: &RequestId) -> bool {
        self.queue.iter().any(|r| &r.id == request_id)
    }

    /// The playlist entry for the given request, if any.
    pub fn playlist_entry(&self, request_id: &RequestId) -> Option<&SongRequest> {
        self.playlist.iter().find(|r| &r.id == request_id)
    }

    /// The request currently playing, if any. At most one request per
    /// event is playing at a time.
    pub fn playing(&self) -> Option<&SongRequest> {
        self.playlist
            .iter()
            .find(|r| r.state == LifecycleState::Playing)
    }

    /// Append a freshly observed request to the queue tail.
    pub(crate) fn push_queued(&mut self, request: SongRequest) {
        self.queue.push_back(request);
    }

    /// Move a queued request onto the playlist, replacing it with the
    /// confirmed record. Returns false (no mutation) if the id is no
    /// longer queued.
    pub(crate) fn promote_to_playlist(
        &mut self,
        request_id: &RequestId,
        mut confirmed: SongRequest,
    ) -> bool {
        let Some(position) = self.queue.iter().position(|r| &r.id == request_id) else {
            return false;
        };
        self.queue.remove(position);
        confirmed.state = LifecycleState::Accepted;
        self.playlist.push(confirmed);
        true
    }

    /// Move a queued request to the head of history as rejected.
    /// Returns false (no mutation) if the id is no longer queued.
    pub(crate) fn retire_from_queue(
        &mut self,
        request_id: &RequestId,
        mut confirmed: SongRequest,
    ) -> bool {
        let Some(position) = self.queue.iter().position(|r| &r.id == request_id) else {
            return false;
        };
        self.queue.remove(position);
        confirmed.state = LifecycleState::Rejected;
        self.history.push_front(confirmed);
        true
    }

    /// Flip an accepted playlist entry to the playing display state.
    pub(crate) fn mark_playing(&mut self, request_id: &RequestId) -> bool {
        match self.playlist.iter_mut().find(|r| &r.id == request_id) {
            Some(entry) if entry.state == LifecycleState::Accepted => {
                entry.state = LifecycleState::Playing;
                true
            }
            _ => false,
        }
    }

    /// Move a playing playlist entry to the head of history as
    /// finished, crediting its payment to the running total. Returns
    /// false (no mutation) if the id is not on the playlist.
    pub(crate) fn retire_from_playlist(
        &mut self,
        request_id: &RequestId,
        mut confirmed: SongRequest,
        payment: f64,
    ) -> bool {
        let Some(position) = self.playlist.iter().position(|r| &r.id == request_id) else {
            return false;
        };
        self.playlist.remove(position);
        confirmed.state = LifecycleState::Finished;
        self.history.push_front(confirmed);
        self.total_amount += payment;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vibe_core::RequestId;

    fn request(id: &str, state: LifecycleState) -> SongRequest {
        let mut r = SongRequest::new(RequestId::new(id), "Song", "Artist");
        r.state = state;
        r
    }

    fn seeded_view() -> EventView {
        let details: EventDetails = serde_json::from_value(serde_json::json!({
            "mEvent": {
                "ID": 7,
                "Name": "Rooftop Party",
                "IsActive": true,
                "MinPrice": 2.5,
                "Code": "XK42"
            },
            "eventTotalEarnings": 10.0,
            "queue": [
                {"ID": 1, "SongName": "First", "ArtistName": "A"},
                {"ID": 2, "SongName": "Second", "ArtistName": "B"}
            ],
            "playlist": [
                {"ID": 3, "SongName": "Third", "ArtistName": "C"}
            ],
            "history": [
                {"ID": 4, "SongName": "Fourth", "ArtistName": "D", "State": 1},
                {"ID": 5, "SongName": "Fifth", "ArtistName": "E", "State": 2}
            ]
        }))
        .unwrap();
        EventView::from_details(details)
    }

    #[test]
    fn seeding_assigns_buckets_and_states() {
        let view = seeded_view();

        assert_eq!(view.event_id.as_str(), "7");
        assert_eq!(view.total_amount, 10.0);
        assert_eq!(view.queue_len(), 2);
        assert_eq!(view.playlist_len(), 1);
        assert_eq!(view.history_len(), 2);

        assert!(view.queue().all(|r| r.state == LifecycleState::Queued));
        assert!(view.playlist().all(|r| r.state == LifecycleState::Accepted));

        let history: Vec<_> = view.history().collect();
        assert_eq!(history[0].state, LifecycleState::Finished);
        assert_eq!(history[1].state, LifecycleState::Rejected);
    }

    #[test]
    fn promote_moves_queue_entry_to_playlist_tail() {
        let mut view = seeded_view();
        let id = RequestId::new("1");

        assert!(view.promote_to_playlist(&id, request("1", LifecycleState::Queued)));

        assert_eq!(view.queue_len(), 1);
        assert_eq!(view.playlist_len(), 2);
        let last = view.playlist().last().unwrap();
        assert_eq!(last.id, id);
        assert_eq!(last.state, LifecycleState::Accepted);
    }

    #[test]
    fn promote_refuses_unknown_id() {
        let mut view = seeded_view();
        let id = RequestId::new("99");

        assert!(!view.promote_to_playlist(&id, request("99", LifecycleState::Queued)));
        assert_eq!(view.queue_len(), 2);
        assert_eq!(view.playlist_len(), 1);
    }

    #[test]
    fn retire_from_queue_prepends_history() {
        let mut view = seeded_view();
        let id = RequestId::new("2");

        assert!(view.retire_from_queue(&id, request("2", LifecycleState::Queued)));

        assert_eq!(view.queue_len(), 1);
        let head = view.history().next().unwrap();
        assert_eq!(head.id, id);
        assert_eq!(head.state, LifecycleState::Rejected);
        assert_eq!(view.total_amount, 10.0);
    }

    #[test]
    fn retire_from_playlist_credits_payment() {
        let mut view = seeded_view();
        let id = RequestId::new("3");
        view.mark_playing(&id);

        assert!(view.retire_from_playlist(&id, request("3", LifecycleState::Playing), 5.0));

        assert_eq!(view.playlist_len(), 0);
        let head = view.history().next().unwrap();
        assert_eq!(head.state, LifecycleState::Finished);
        assert_eq!(view.total_amount, 15.0);
    }

    #[test]
    fn mark_playing_requires_accepted_state() {
        let mut view = seeded_view();
        let id = RequestId::new("3");

        assert!(view.mark_playing(&id));
        assert_eq!(view.playing().unwrap().id, id);
        // Already playing, not accepted anymore.
        assert!(!view.mark_playing(&id));
    }
}
