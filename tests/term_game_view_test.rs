use memo_match::app::App;
use memo_match::ledger::{Address, LedgerError, LedgerEvent};
use memo_match::term::{encode_diff_into, AnchorY, FrameBuffer, GameView, Viewport};
use memo_match::types::{GameAction, DECK_SIZE};

fn app(seed: u32) -> App {
    App::new(seed, Address::repeat_byte(0xcc))
}

fn finish(app: &mut App) {
    let cards = *app.game().board().cards();
    let mut done = [false; DECK_SIZE];
    for i in 0..DECK_SIZE {
        if done[i] {
            continue;
        }
        let twin = (i + 1..DECK_SIZE)
            .find(|&j| cards[j].symbol == cards[i].symbol)
            .unwrap();
        done[i] = true;
        done[twin] = true;
        app.handle_action(GameAction::FlipAt(i));
        app.handle_action(GameAction::FlipAt(twin));
    }
}

#[test]
fn term_view_top_anchor_draws_title_first_row() {
    let app = app(1);
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&app, Viewport::new(90, 26));
    assert!(fb.row_text(0).contains("MEMO MATCH"));
    assert!(fb.row_text(1).contains('┌'));
}

#[test]
fn term_view_shows_result_overlay_when_game_ends() {
    let mut app = app(4);
    finish(&mut app);
    let fb = GameView::default().render(&app, Viewport::new(100, 30));
    assert!(fb.contains_text("GAME COMPLETE!"));
    assert!(fb.contains_text("Score 9920"));
    assert!(fb.contains_text("c connect"));
}

#[test]
fn term_view_matched_cards_stay_face_up() {
    let mut app = app(4);
    finish(&mut app);
    let fb = GameView::default().render(&app, Viewport::new(100, 30));
    // Overlay covers part of the grid but no hidden cards remain anywhere.
    assert!(!fb.cells().iter().any(|c| c.ch == '?'));
}

#[test]
fn term_view_cursor_follows_moves() {
    let mut app = app(1);
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let vp = Viewport::new(100, 30);
    let before = view.render(&app, vp);
    app.handle_action(GameAction::MoveCursor(memo_match::types::Direction::Right));
    let after = view.render(&app, vp);

    let marker = |fb: &FrameBuffer| {
        (0..fb.height())
            .flat_map(|y| (0..fb.width()).map(move |x| (x, y)))
            .find(|&(x, y)| fb.get(x, y).map(|c| c.ch) == Some('▶'))
            .unwrap()
    };
    let (x0, y0) = marker(&before);
    let (x1, y1) = marker(&after);
    assert_eq!(y0, y1);
    assert!(x1 > x0);
}

#[test]
fn term_view_unchanged_state_has_empty_diff() {
    let app = app(1);
    let view = GameView::default();
    let vp = Viewport::new(100, 30);
    let a = view.render(&app, vp);
    let b = view.render(&app, vp);
    assert_eq!(a, b);

    let mut out = Vec::new();
    encode_diff_into(&a, &b, &mut out).unwrap();
    assert!(!String::from_utf8_lossy(&out).contains("MEMO"));
}

#[test]
fn term_view_top_count_shown() {
    let mut app = app(1);
    app.apply_ledger_event(LedgerEvent::TopCount(10));
    let fb = GameView::default().render(&app, Viewport::new(100, 30));
    assert!(fb.contains_text("LEADERBOARD (top 10)"));
}

#[test]
fn term_view_stacks_notices_newest_on_top() {
    let mut app = app(1);
    app.apply_ledger_event(LedgerEvent::BestScore(Err(LedgerError::ReadError(
        "first".into(),
    ))));
    app.apply_ledger_event(LedgerEvent::Leaderboard(Err(LedgerError::ReadError(
        "second".into(),
    ))));
    let fb = GameView::default().render(&app, Viewport::new(120, 30));
    assert!(fb.row_text(0).contains("Could not load leaderboard"));
    assert!(fb.row_text(1).contains("Could not load best score"));
}
