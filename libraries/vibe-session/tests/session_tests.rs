//! Behavior tests for the event session.
//!
//! The remote authority is mocked; the hub subscription is driven by
//! hand-built channels so pushes and teardown can be interleaved
//! deliberately.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use vibe_core::{EventId, LifecycleState, RequestId};
use vibe_queue_hub::{HubSubscription, IncomingSong};
use vibe_server_client::{ClientError, EventDetails, FinishedSongRow, SongRow};
use vibe_session::{
    EventSession, EventView, FixedPlaybackTimer, PlaybackTimer, RequestAuthority, SessionError,
};

mockall::mock! {
    Authority {}

    #[async_trait]
    impl RequestAuthority for Authority {
        async fn mark_accepted(
            &self,
            event_id: &EventId,
            request_id: &RequestId,
        ) -> Result<SongRow, ClientError>;

        async fn mark_rejected(
            &self,
            event_id: &EventId,
            request_id: &RequestId,
        ) -> Result<SongRow, ClientError>;

        async fn mark_playing(
            &self,
            event_id: &EventId,
            request_id: &RequestId,
        ) -> Result<(), ClientError>;

        async fn mark_finished(
            &self,
            event_id: &EventId,
            request_id: &RequestId,
        ) -> Result<FinishedSongRow, ClientError>;
    }
}

fn song_row(id: &str, title: &str, artist: &str) -> SongRow {
    serde_json::from_value(serde_json::json!({
        "ID": id,
        "SongName": title,
        "ArtistName": artist,
        "Votes": 0
    }))
    .unwrap()
}

fn finished_row(id: &str, title: &str, artist: &str, payment: f64) -> FinishedSongRow {
    serde_json::from_value(serde_json::json!({
        "ID": id,
        "SongName": title,
        "ArtistName": artist,
        "Timestamp": "2026-05-03T21:15:00.0000000",
        "Payment": {"ConvertedPayedAmount": payment}
    }))
    .unwrap()
}

fn incoming(id: &str, title: &str) -> IncomingSong {
    IncomingSong {
        id: id.to_string(),
        song_name: title.to_string(),
        artist_name: "Artist".to_string(),
        votes: 0,
        image_url: None,
    }
}

/// An event view with the given request ids pre-sorted into buckets.
fn view(queue: &[&str], playlist: &[&str], total: f64) -> EventView {
    let row = |id: &&str| {
        serde_json::json!({"ID": *id, "SongName": format!("Song {id}"), "ArtistName": "Artist"})
    };
    let details: EventDetails = serde_json::from_value(serde_json::json!({
        "mEvent": {"ID": 7, "Name": "Party", "IsActive": true, "MinPrice": 1.0},
        "eventTotalEarnings": total,
        "queue": queue.iter().map(row).collect::<Vec<_>>(),
        "playlist": playlist.iter().map(row).collect::<Vec<_>>(),
        "history": []
    }))
    .unwrap();
    EventView::from_details(details)
}

fn timer() -> Arc<dyn PlaybackTimer> {
    Arc::new(FixedPlaybackTimer::new(Duration::from_secs(20)))
}

fn session(view: EventView, authority: MockAuthority) -> EventSession {
    EventSession::from_parts(view, Arc::new(authority), timer(), None)
}

fn subscribed_session(
    view: EventView,
    authority: MockAuthority,
) -> (
    EventSession,
    mpsc::UnboundedSender<IncomingSong>,
    oneshot::Receiver<()>,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let (close_tx, close_rx) = oneshot::channel();
    let subscription = HubSubscription::new(rx, close_tx);
    let session =
        EventSession::from_parts(view, Arc::new(authority), timer(), Some(subscription));
    (session, tx, close_rx)
}

fn queue_ids(session: &EventSession) -> Vec<String> {
    session
        .view()
        .queue()
        .map(|r| r.id.as_str().to_string())
        .collect()
}

mod accept {
    use super::*;

    #[tokio::test]
    async fn moves_request_from_queue_to_playlist() {
        let mut authority = MockAuthority::new();
        authority
            .expect_mark_accepted()
            .withf(|event, request| event.as_str() == "7" && request.as_str() == "A")
            .returning(|_, _| Ok(song_row("A", "T", "Artist")));
        let mut session = session(view(&["A"], &[], 0.0), authority);

        session.accept(&RequestId::new("A")).await.unwrap();

        assert_eq!(session.view().queue_len(), 0);
        assert_eq!(session.view().playlist_len(), 1);
        let entry = session.view().playlist().next().unwrap();
        assert_eq!(entry.id.as_str(), "A");
        assert_eq!(entry.state, LifecycleState::Accepted);
        // The confirmed record wins over the cached copy.
        assert_eq!(entry.title, "T");
    }

    #[tokio::test]
    async fn failure_leaves_both_buckets_unchanged() {
        let mut authority = MockAuthority::new();
        authority.expect_mark_accepted().returning(|_, _| {
            Err(ClientError::Server {
                status: 500,
                message: "boom".to_string(),
            })
        });
        let mut session = session(view(&["A", "B"], &["C"], 0.0), authority);

        let error = session.accept(&RequestId::new("A")).await.unwrap_err();

        assert!(matches!(error, SessionError::Authority(_)));
        assert_eq!(session.view().queue_len(), 2);
        assert_eq!(session.view().playlist_len(), 1);
    }

    #[tokio::test]
    async fn unknown_request_is_a_stale_error_without_a_call() {
        let mut authority = MockAuthority::new();
        authority.expect_mark_accepted().never();
        let mut session = session(view(&["A"], &[], 0.0), authority);

        let error = session.accept(&RequestId::new("Z")).await.unwrap_err();

        assert!(matches!(error, SessionError::Stale(_)));
        assert_eq!(session.view().queue_len(), 1);
    }
}

mod reject {
    use super::*;

    #[tokio::test]
    async fn moves_request_to_history_head_without_payment() {
        let mut authority = MockAuthority::new();
        authority
            .expect_mark_rejected()
            .returning(|_, request| Ok(song_row(request.as_str(), "Song", "Artist")));
        let mut session = session(view(&["A", "B"], &[], 10.0), authority);

        session.reject(&RequestId::new("B")).await.unwrap();
        session.reject(&RequestId::new("A")).await.unwrap();

        assert_eq!(session.view().queue_len(), 0);
        let history: Vec<_> = session.view().history().collect();
        // Most recent rejection first.
        assert_eq!(history[0].id.as_str(), "A");
        assert_eq!(history[1].id.as_str(), "B");
        assert!(history.iter().all(|r| r.state == LifecycleState::Rejected));
        assert_eq!(session.view().total_amount, 10.0);
    }
}

mod playback {
    use super::*;

    #[tokio::test]
    async fn play_then_finish_credits_payment() {
        let mut authority = MockAuthority::new();
        authority.expect_mark_playing().returning(|_, _| Ok(()));
        authority
            .expect_mark_finished()
            .returning(|_, _| Ok(finished_row("B", "Song B", "Artist", 5.0)));
        let mut session = session(view(&[], &["B"], 10.0), authority);
        let id = RequestId::new("B");

        session.start_playing(&id).await.unwrap();
        assert_eq!(session.view().playing().unwrap().id, id);

        session.finish_playing(&id).await.unwrap();

        assert_eq!(session.view().playlist_len(), 0);
        let head = session.view().history().next().unwrap();
        assert_eq!(head.id, id);
        assert_eq!(head.state, LifecycleState::Finished);
        assert!(head.timestamp.is_some());
        assert_eq!(session.view().total_amount, 15.0);
    }

    #[tokio::test(start_paused = true)]
    async fn play_through_waits_out_the_countdown() {
        let mut authority = MockAuthority::new();
        authority.expect_mark_playing().returning(|_, _| Ok(()));
        authority
            .expect_mark_finished()
            .returning(|_, _| Ok(finished_row("B", "Song B", "Artist", 2.5)));
        let mut session = session(view(&[], &["B"], 0.0), authority);
        let started = tokio::time::Instant::now();

        session.play_through(&RequestId::new("B")).await.unwrap();

        assert!(started.elapsed() >= Duration::from_secs(20));
        assert_eq!(session.view().total_amount, 2.5);
    }

    #[tokio::test]
    async fn only_one_request_plays_at_a_time() {
        let mut authority = MockAuthority::new();
        authority.expect_mark_playing().once().returning(|_, _| Ok(()));
        let mut session = session(view(&[], &["B", "C"], 0.0), authority);

        session.start_playing(&RequestId::new("B")).await.unwrap();
        let error = session
            .start_playing(&RequestId::new("C"))
            .await
            .unwrap_err();

        assert!(matches!(error, SessionError::Stale(_)));
        assert_eq!(session.view().playing().unwrap().id.as_str(), "B");
    }

    #[tokio::test]
    async fn failed_finish_leaves_the_request_playing() {
        let mut authority = MockAuthority::new();
        authority.expect_mark_playing().returning(|_, _| Ok(()));
        authority.expect_mark_finished().returning(|_, _| {
            Err(ClientError::Server {
                status: 500,
                message: "boom".to_string(),
            })
        });
        let mut session = session(view(&[], &["B"], 10.0), authority);
        let id = RequestId::new("B");

        session.start_playing(&id).await.unwrap();
        let error = session.finish_playing(&id).await.unwrap_err();

        assert!(matches!(error, SessionError::Authority(_)));
        // Not rolled back to accepted; manual recovery.
        assert_eq!(
            session.view().playlist_entry(&id).unwrap().state,
            LifecycleState::Playing
        );
        assert_eq!(session.view().total_amount, 10.0);
    }

    #[tokio::test]
    async fn finish_requires_a_playing_request() {
        let mut authority = MockAuthority::new();
        authority.expect_mark_finished().never();
        let mut session = session(view(&[], &["B"], 0.0), authority);

        let error = session
            .finish_playing(&RequestId::new("B"))
            .await
            .unwrap_err();

        assert!(matches!(error, SessionError::Stale(_)));
    }
}

mod ingestion {
    use super::*;

    #[tokio::test]
    async fn pushes_append_to_the_queue_tail_only() {
        let (mut session, tx, _close_rx) =
            subscribed_session(view(&["A"], &["B"], 0.0), MockAuthority::new());

        tx.send(incoming("X", "First push")).unwrap();
        tx.send(incoming("Y", "Second push")).unwrap();

        assert_eq!(session.drain_incoming(), 2);
        assert_eq!(queue_ids(&session), ["A", "X", "Y"]);
        assert_eq!(session.view().playlist_len(), 1);
        assert_eq!(session.view().history_len(), 0);
    }

    #[tokio::test]
    async fn duplicate_ids_are_appended_as_delivered() {
        let (mut session, tx, _close_rx) =
            subscribed_session(view(&[], &[], 0.0), MockAuthority::new());

        tx.send(incoming("X", "Push")).unwrap();
        tx.send(incoming("X", "Push")).unwrap();

        assert_eq!(session.drain_incoming(), 2);
        assert_eq!(queue_ids(&session), ["X", "X"]);
    }

    #[tokio::test]
    async fn recv_ingests_one_push() {
        let (mut session, tx, _close_rx) =
            subscribed_session(view(&[], &[], 0.0), MockAuthority::new());

        tx.send(incoming("X", "Push")).unwrap();

        assert!(session.recv_incoming().await);
        assert_eq!(queue_ids(&session), ["X"]);
    }
}

mod teardown {
    use super::*;

    #[tokio::test]
    async fn close_prevents_pending_deliveries_from_mutating() {
        let (mut session, tx, close_rx) =
            subscribed_session(view(&["A"], &[], 0.0), MockAuthority::new());

        session.close().await;
        assert!(close_rx.await.is_ok());

        // A delivery racing with teardown never reaches the view.
        let _ = tx.send(incoming("X", "Late push"));
        assert_eq!(session.drain_incoming(), 0);
        assert_eq!(queue_ids(&session), ["A"]);
    }

    #[tokio::test]
    async fn operations_on_a_closed_session_fail_without_a_call() {
        let mut authority = MockAuthority::new();
        authority.expect_mark_accepted().never();
        let (mut session, _tx, _close_rx) =
            subscribed_session(view(&["A"], &[], 0.0), authority);

        session.close().await;
        let error = session.accept(&RequestId::new("A")).await.unwrap_err();

        assert!(matches!(error, SessionError::Closed));
        assert_eq!(queue_ids(&session), ["A"]);
    }

    #[tokio::test]
    async fn closing_twice_is_harmless() {
        let (mut session, _tx, _close_rx) =
            subscribed_session(view(&[], &[], 0.0), MockAuthority::new());

        session.close().await;
        session.close().await;
        assert!(session.is_closed());
    }
}

mod exclusivity {
    use super::*;
    use proptest::prelude::*;

    /// Authority that always confirms, echoing back the request id.
    struct AlwaysConfirm;

    #[async_trait]
    impl RequestAuthority for AlwaysConfirm {
        async fn mark_accepted(
            &self,
            _event_id: &EventId,
            request_id: &RequestId,
        ) -> Result<SongRow, ClientError> {
            Ok(song_row(request_id.as_str(), "Song", "Artist"))
        }

        async fn mark_rejected(
            &self,
            _event_id: &EventId,
            request_id: &RequestId,
        ) -> Result<SongRow, ClientError> {
            Ok(song_row(request_id.as_str(), "Song", "Artist"))
        }

        async fn mark_playing(
            &self,
            _event_id: &EventId,
            _request_id: &RequestId,
        ) -> Result<(), ClientError> {
            Ok(())
        }

        async fn mark_finished(
            &self,
            _event_id: &EventId,
            request_id: &RequestId,
        ) -> Result<FinishedSongRow, ClientError> {
            Ok(finished_row(request_id.as_str(), "Song", "Artist", 1.0))
        }
    }

    #[derive(Debug, Clone)]
    enum Op {
        Accept(usize),
        Reject(usize),
        Play(usize),
        Finish,
        Ingest(u8),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..8usize).prop_map(Op::Accept),
            (0..8usize).prop_map(Op::Reject),
            (0..8usize).prop_map(Op::Play),
            Just(Op::Finish),
            (0..200u8).prop_map(Op::Ingest),
        ]
    }

    fn nth_queue_id(session: &EventSession, index: usize) -> Option<RequestId> {
        session
            .view()
            .queue()
            .nth(index % session.view().queue_len().max(1))
            .map(|r| r.id.clone())
    }

    fn nth_playlist_id(session: &EventSession, index: usize) -> Option<RequestId> {
        session
            .view()
            .playlist()
            .nth(index % session.view().playlist_len().max(1))
            .map(|r| r.id.clone())
    }

    fn assert_exclusive(session: &EventSession, expected_total: usize) {
        let view = session.view();
        let mut ids: Vec<&str> = view
            .queue()
            .chain(view.playlist())
            .chain(view.history())
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids.len(), expected_total, "request lost or duplicated");
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), expected_total, "request id in two buckets");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Every id stays in exactly one bucket across any sequence of
        /// succeeding operations.
        #[test]
        fn every_request_lives_in_exactly_one_bucket(ops in prop::collection::vec(op_strategy(), 1..40)) {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
                .unwrap();
            runtime.block_on(async move {
                let mut session = EventSession::from_parts(
                    view(&["A", "B", "C"], &["D"], 0.0),
                    Arc::new(AlwaysConfirm),
                    timer(),
                    None,
                );
                let mut total = 4usize;
                let mut next_push = 0u32;

                for op in ops {
                    match op {
                        Op::Accept(i) => {
                            if let Some(id) = nth_queue_id(&session, i) {
                                session.accept(&id).await.unwrap();
                            }
                        }
                        Op::Reject(i) => {
                            if let Some(id) = nth_queue_id(&session, i) {
                                session.reject(&id).await.unwrap();
                            }
                        }
                        Op::Play(i) => {
                            if let Some(id) = nth_playlist_id(&session, i) {
                                // Starting may be refused while another
                                // request plays; refusal must not mutate.
                                let _ = session.start_playing(&id).await;
                            }
                        }
                        Op::Finish => {
                            if let Some(id) = session.view().playing().map(|r| r.id.clone()) {
                                session.finish_playing(&id).await.unwrap();
                            }
                        }
                        Op::Ingest(_) => {
                            next_push += 1;
                            session.ingest_incoming(incoming(&format!("push-{next_push}"), "Push"));
                            total += 1;
                        }
                    }
                    assert_exclusive(&session, total);
                }
            });
        }
    }
}
