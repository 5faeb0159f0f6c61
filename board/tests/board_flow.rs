use std::sync::Arc;
use std::thread;
use std::time::Duration;

use feedback_board::{Board, BoardError, FeedbackQuery, SortOrder, StatusFilter};
use feedback_nullables::{FailingStore, MemoryStore, NullClock};
use feedback_types::{Category, FeedbackStatus, NewFeedback, VoterId};

fn board() -> (Arc<NullClock>, Board) {
    let clock = Arc::new(NullClock::new(0));
    let board = Board::with_clock(Arc::new(MemoryStore::new()), clock.clone());
    (clock, board)
}

fn idea(title: &str) -> NewFeedback {
    NewFeedback {
        title: title.to_string(),
        description: format!("{title} would help"),
        category: Category::Improvement,
    }
}

fn voter(name: &str) -> VoterId {
    VoterId::parse(name).unwrap()
}

#[test]
fn ranking_follows_votes() {
    let (clock, board) = board();
    let a = board.feedback.submit(idea("Search")).unwrap().id;
    clock.advance(1);
    let b = board.feedback.submit(idea("Filters")).unwrap().id;
    clock.advance(1);
    let c = board.feedback.submit(idea("Exports")).unwrap().id;

    board.feedback.upvote(b, &voter("alice")).unwrap();
    board.feedback.upvote(b, &voter("bob")).unwrap();
    board.feedback.downvote(c, &voter("alice")).unwrap();

    let ranked: Vec<_> = board
        .feedback
        .list(&FeedbackQuery::default())
        .unwrap()
        .into_iter()
        .map(|i| i.id)
        .collect();
    assert_eq!(ranked, [b, a, c]);

    let newest = FeedbackQuery {
        sort: SortOrder::Newest,
        ..Default::default()
    };
    let first = &board.feedback.list(&newest).unwrap()[0];
    assert_eq!(first.id, c);
}

#[test]
fn status_filter_after_moderation() {
    let (_, board) = board();
    let a = board.feedback.submit(idea("Search")).unwrap().id;
    board.feedback.submit(idea("Filters")).unwrap();
    board
        .feedback
        .update_status(a, FeedbackStatus::InProgress)
        .unwrap();

    let query = FeedbackQuery {
        status: StatusFilter::Only(FeedbackStatus::InProgress),
        ..Default::default()
    };
    let items = board.feedback.list(&query).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, a);
}

#[test]
fn status_change_does_not_drop_concurrent_vote() {
    let store = Arc::new(FailingStore::new(MemoryStore::new()));
    let board = Arc::new(Board::with_clock(store.clone(), Arc::new(NullClock::new(0))));
    let id = board.feedback.submit(idea("Roadmap sync")).unwrap().id;

    // The status change stalls between its read and its write.
    store.delay_next_fetch(Duration::from_millis(300));
    let moderator = {
        let board = board.clone();
        thread::spawn(move || board.feedback.update_status(id, FeedbackStatus::Planned))
    };
    thread::sleep(Duration::from_millis(50));
    board.feedback.upvote(id, &voter("alice")).unwrap();
    moderator.join().unwrap().unwrap();

    let item = board.feedback.get(id).unwrap();
    assert_eq!(item.status, FeedbackStatus::Planned);
    assert_eq!(item.upvotes, 1);
    assert!(item.upvoted_by.contains(&voter("alice")));
}

#[test]
fn concurrent_toggles_keep_counters_consistent() {
    let (_, board) = board();
    let board = Arc::new(board);
    let id = board.feedback.submit(idea("Realtime")).unwrap().id;

    // Each voter votes up twice (net zero) or once (net one).
    let handles: Vec<_> = (0..12)
        .map(|n| {
            let board = board.clone();
            thread::spawn(move || {
                let v = voter(&format!("v{n}"));
                board.feedback.upvote(id, &v).unwrap();
                if n % 2 == 0 {
                    board.feedback.upvote(id, &v).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let item = board.feedback.get(id).unwrap();
    assert_eq!(item.upvotes, 6);
    assert_eq!(item.upvoted_by.len(), 6);
    assert!(item.check_invariants().is_ok());
}

#[test]
fn deleted_item_rejects_votes_and_comments() {
    let (_, board) = board();
    let id = board.feedback.submit(idea("Temp")).unwrap().id;
    board.feedback.delete(id).unwrap();
    assert!(matches!(
        board.feedback.upvote(id, &voter("alice")),
        Err(BoardError::NotFound(_))
    ));
    assert!(matches!(board.feedback.comments(id), Err(BoardError::NotFound(_))));
}
