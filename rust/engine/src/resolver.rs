use crate::board::Board;
use crate::scheduler::Generation;
use crate::session::{PendingPair, Session};

/// What a resolution task did to the session.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Resolution {
    Matched {
        pair: PendingPair,
        matched_pairs: usize,
        /// This match found the last pair
        completed: bool,
    },
    Mismatched {
        pair: PendingPair,
    },
    /// The board was rebuilt since scheduling, or the pair is no longer
    /// pending. Nothing was touched.
    Stale,
}

/// Settles the pair captured at scheduling time.
///
/// `scheduled_under` is the generation stored in the task; when it differs
/// from the session's generation the task belongs to a discarded board and
/// resolves to [`Resolution::Stale`] without mutating anything.
pub fn resolve(
    session: &mut Session,
    board: &Board,
    pair: PendingPair,
    scheduled_under: Generation,
) -> Resolution {
    if scheduled_under != session.generation() || !session.is_pending(&pair) {
        return Resolution::Stale;
    }
    let (Some(a), Some(b)) = (board.symbol(pair.first), board.symbol(pair.second)) else {
        return Resolution::Stale;
    };

    if a == b {
        let was_complete = session.is_complete();
        let matched_pairs = session.settle_match(&pair);
        Resolution::Matched {
            pair,
            matched_pairs,
            completed: !was_complete && session.is_complete(),
        }
    } else {
        session.settle_mismatch(&pair);
        Resolution::Mismatched { pair }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, CardState, SymbolKey};
    use crate::config::LayoutConfig;
    use crate::deck::Deck;
    use crate::session::FlipOutcome;

    // unshuffled: [a, a, b, b]
    fn setup() -> (Board, Session) {
        let deck = Deck::from_symbols(&[SymbolKey::from("a"), SymbolKey::from("b")]).unwrap();
        let board = Board::build(deck, 1, 4, &LayoutConfig::default()).unwrap();
        let session = Session::new(Generation::FIRST, &board);
        (board, session)
    }

    fn pair(session: &mut Session, a: usize, b: usize) -> PendingPair {
        session.flip(CardId(a));
        match session.flip(CardId(b)) {
            FlipOutcome::PairPending(p) => p,
            other => panic!("expected pending pair, got {:?}", other),
        }
    }

    #[test]
    fn equal_symbols_match() {
        let (board, mut session) = setup();
        let p = pair(&mut session, 0, 1);
        let res = resolve(&mut session, &board, p, Generation::FIRST);
        assert_eq!(
            res,
            Resolution::Matched {
                pair: p,
                matched_pairs: 1,
                completed: false
            }
        );
        assert_eq!(session.state(CardId(0)), Some(CardState::Matched));
        assert!(!session.is_input_locked());
    }

    #[test]
    fn last_pair_completes_once() {
        let (board, mut session) = setup();
        let p = pair(&mut session, 0, 1);
        resolve(&mut session, &board, p, Generation::FIRST);
        let p = pair(&mut session, 3, 2);
        let res = resolve(&mut session, &board, p, Generation::FIRST);
        assert!(matches!(
            res,
            Resolution::Matched {
                matched_pairs: 2,
                completed: true,
                ..
            }
        ));
        // delivering the same task twice changes nothing
        assert_eq!(
            resolve(&mut session, &board, p, Generation::FIRST),
            Resolution::Stale
        );
        assert_eq!(session.matched_pairs(), 2);
    }

    #[test]
    fn old_generation_is_stale() {
        let (board, mut session) = setup();
        let p = pair(&mut session, 1, 2);
        let before = session.clone();
        let res = resolve(&mut session, &board, p, Generation::FIRST.next());
        assert_eq!(res, Resolution::Stale);
        assert_eq!(session, before);
    }
}
