use super::*;
use crate::figure::{Figure, GridCell};

/// Figure-backed surface that replays a fixed list of key presses
#[derive(Default)]
struct ScriptedSurface {
    figure: Figure,
    keys: Vec<InputKey>,
    visibility_calls: usize,
    redraws: usize,
    subscriptions: usize,
    shows: usize,
    /// Visible pane indices and indicator text after each replayed key
    snapshots: Vec<(Vec<usize>, String)>,
}

impl ScriptedSurface {
    fn with_panes(count: usize) -> (Self, Vec<PaneId>) {
        let mut surface = Self::default();
        let panes = (0..count)
            .map(|_| surface.figure.add_axes(GridCell::FULL))
            .collect();
        (surface, panes)
    }

    fn script(mut self, keys: &[InputKey]) -> Self {
        self.keys = keys.to_vec();
        self
    }

    fn visible(&self) -> Vec<usize> {
        self.figure
            .visible_panes()
            .map(|(id, _)| id.index())
            .collect()
    }

    fn indicator(&self) -> String {
        self.figure
            .texts()
            .next()
            .map(|t| t.content.clone())
            .unwrap_or_default()
    }
}

impl Surface for ScriptedSurface {
    fn contains(&self, pane: PaneId) -> bool {
        self.figure.contains(pane)
    }

    fn set_visible(&mut self, pane: PaneId, visible: bool) {
        self.visibility_calls += 1;
        self.figure.set_visible(pane, visible);
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
    }

    fn add_text(&mut self, text: TextAnnotation) -> TextId {
        self.figure.add_text(text)
    }

    fn set_text(&mut self, id: TextId, content: &str) {
        self.figure.set_text(id, content);
    }

    fn connect_key_press(&mut self) -> SubscriptionId {
        self.subscriptions += 1;
        SubscriptionId(self.subscriptions)
    }

    fn show(&mut self, on_key: &mut dyn FnMut(&mut Self, InputKey)) -> Result<()> {
        self.shows += 1;
        for key in self.keys.clone() {
            on_key(self, key);
            let snapshot = (self.visible(), self.indicator());
            self.snapshots.push(snapshot);
        }
        Ok(())
    }
}

fn indicator(position: usize, total: usize) -> String {
    format!("{NAVIGATION_INSTRUCTION} ({position}/{total})")
}

#[test]
fn test_add_preserves_call_order() {
    let (surface, panes) = ScriptedSurface::with_panes(4);
    let mut seq = SubplotSequence::new(surface);

    seq.add(panes[2]).unwrap();
    seq.add(vec![panes[0], panes[1]]).unwrap();
    seq.add(vec![vec![panes[3]], vec![panes[1]]]).unwrap();

    assert_eq!(seq.len(), 3);
    let groups: Vec<Vec<PaneId>> = seq.groups().map(<[PaneId]>::to_vec).collect();
    assert_eq!(
        groups,
        vec![
            vec![panes[2]],
            vec![panes[0], panes[1]],
            vec![panes[3], panes[1]],
        ]
    );
    assert_eq!(seq.current(), None);
}

#[test]
fn test_add_slice_group() {
    let (surface, panes) = ScriptedSurface::with_panes(2);
    let mut seq = SubplotSequence::new(surface);
    seq.add(panes.as_slice()).unwrap();
    assert_eq!(seq.groups().next().unwrap(), panes.as_slice());
}

#[test]
fn test_invalid_add_leaves_sequence_unchanged() {
    let (surface, panes) = ScriptedSurface::with_panes(1);
    let mut seq = SubplotSequence::new(surface);
    seq.add(panes[0]).unwrap();

    let err = seq.add(Vec::<PaneId>::new()).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));

    let empty_grid: Vec<Vec<PaneId>> = vec![vec![], vec![]];
    assert!(matches!(
        seq.add(empty_grid),
        Err(Error::InvalidArgument { .. })
    ));

    // pane from a different figure
    let mut other = Figure::new();
    other.add_axes(GridCell::FULL);
    let foreign = other.add_axes(GridCell::FULL);
    assert!(matches!(
        seq.add(vec![panes[0], foreign]),
        Err(Error::InvalidArgument { .. })
    ));

    assert_eq!(seq.len(), 1);
}

#[test]
fn test_add_rejects_foreign_pane_with_index_in_range() {
    let (surface, panes) = ScriptedSurface::with_panes(2);
    let mut seq = SubplotSequence::new(surface);
    seq.add(panes[0]).unwrap();

    let foreign = Figure::new().add_axes(GridCell::FULL);
    assert_eq!(foreign.index(), 0);
    assert!(matches!(seq.add(foreign), Err(Error::InvalidArgument { .. })));
    assert!(matches!(
        seq.add(vec![panes[1], foreign]),
        Err(Error::InvalidArgument { .. })
    ));

    assert_eq!(seq.len(), 1);
    assert_eq!(seq.surface().visibility_calls, 0);
}

#[test]
fn test_show_empty_fails_without_side_effects() {
    let (surface, _) = ScriptedSurface::with_panes(2);
    let mut seq = SubplotSequence::new(surface);

    let err = seq.show().unwrap_err();
    assert!(matches!(err, Error::EmptyState { .. }));

    let surface = seq.surface();
    assert_eq!(surface.visibility_calls, 0);
    assert_eq!(surface.subscriptions, 0);
    assert_eq!(surface.shows, 0);
    assert_eq!(surface.figure.texts().count(), 0);
    assert_eq!(seq.current(), None);
}

#[test]
fn test_show_displays_only_first_group() {
    let (surface, panes) = ScriptedSurface::with_panes(3);
    let mut seq = SubplotSequence::new(surface);
    for pane in &panes {
        seq.add(*pane).unwrap();
    }

    seq.show().unwrap();

    assert_eq!(seq.current(), Some(0));
    assert_eq!(seq.surface().visible(), vec![0]);
    assert_eq!(seq.surface().indicator(), indicator(1, 3));
    assert_eq!(seq.indicator_text(), Some(indicator(1, 3)));
    assert_eq!(seq.surface().shows, 1);
    assert_eq!(seq.surface().subscriptions, 1);
}

#[test]
fn test_indicator_annotation_placement() {
    let (surface, panes) = ScriptedSurface::with_panes(1);
    let mut seq = SubplotSequence::new(surface);
    seq.add(panes[0]).unwrap();
    seq.show().unwrap();

    let id = seq.indicator().unwrap();
    let text = seq.surface().figure.text(id).unwrap();
    assert_eq!((text.x, text.y), (0.5, 0.01));
    assert_eq!(text.h_align, HorizontalAlign::Center);
    assert_eq!(text.v_align, VerticalAlign::Bottom);
    assert_eq!(text.font_size, 9.0);
    assert_eq!(text.color, "gray");
    assert_eq!(text.alpha, 0.8);
}

#[test]
fn test_three_group_navigation_scenario() {
    let (surface, panes) = ScriptedSurface::with_panes(3);
    let surface = surface.script(&[
        InputKey::Right,
        InputKey::Right,
        InputKey::Right,
        InputKey::Left,
    ]);
    let mut seq = SubplotSequence::new(surface);
    for pane in &panes {
        seq.add(*pane).unwrap();
    }

    seq.show().unwrap();

    let snapshots = &seq.surface().snapshots;
    assert_eq!(snapshots[0], (vec![1], indicator(2, 3)));
    assert_eq!(snapshots[1], (vec![2], indicator(3, 3)));
    // no wrap past the end
    assert_eq!(snapshots[2], (vec![2], indicator(3, 3)));
    assert_eq!(snapshots[3], (vec![1], indicator(2, 3)));
    assert_eq!(seq.current(), Some(1));
}

#[test]
fn test_retreat_at_start_is_noop() {
    let (surface, panes) = ScriptedSurface::with_panes(2);
    let surface = surface.script(&[InputKey::Up, InputKey::Down, InputKey::Up, InputKey::Up]);
    let mut seq = SubplotSequence::new(surface);
    seq.add(panes[0]).unwrap();
    seq.add(panes[1]).unwrap();

    seq.show().unwrap();

    let visible: Vec<Vec<usize>> = seq
        .surface()
        .snapshots
        .iter()
        .map(|(v, _)| v.clone())
        .collect();
    assert_eq!(visible, vec![vec![0], vec![1], vec![0], vec![0]]);
}

#[test]
fn test_single_group_with_two_panes() {
    let (surface, panes) = ScriptedSurface::with_panes(2);
    let surface = surface.script(&[InputKey::Right, InputKey::Left]);
    let mut seq = SubplotSequence::new(surface);
    seq.add(vec![panes[0], panes[1]]).unwrap();

    seq.show().unwrap();

    assert_eq!(seq.surface().visible(), vec![0, 1]);
    for snapshot in &seq.surface().snapshots {
        assert_eq!(snapshot, &(vec![0, 1], indicator(1, 1)));
    }
    // no state change means no redraw beyond the initial one
    assert_eq!(seq.surface().redraws, 1);
}

#[test]
fn test_other_keys_ignored() {
    let (surface, panes) = ScriptedSurface::with_panes(2);
    let surface = surface.script(&[
        InputKey::Char('n'),
        InputKey::Enter,
        InputKey::PageDown,
        InputKey::CharCtrl('c'),
    ]);
    let mut seq = SubplotSequence::new(surface);
    seq.add(panes[0]).unwrap();
    seq.add(panes[1]).unwrap();

    seq.show().unwrap();

    assert!(seq
        .surface()
        .snapshots
        .iter()
        .all(|(visible, _)| visible == &vec![0]));
    assert_eq!(seq.current(), Some(0));
}

#[test]
fn test_show_again_resets_and_subscribes_once() {
    let (surface, panes) = ScriptedSurface::with_panes(2);
    let surface = surface.script(&[InputKey::Right]);
    let mut seq = SubplotSequence::new(surface);
    seq.add(panes[0]).unwrap();
    seq.add(panes[1]).unwrap();

    seq.show().unwrap();
    assert_eq!(seq.current(), Some(1));

    seq.surface_mut().keys.clear();
    seq.show().unwrap();
    assert_eq!(seq.current(), Some(0));
    assert_eq!(seq.surface().visible(), vec![0]);
    assert_eq!(seq.surface().subscriptions, 1);
    assert_eq!(seq.surface().figure.texts().count(), 1);
}

#[test]
fn test_add_after_show_is_hidden_but_reachable() {
    let (surface, panes) = ScriptedSurface::with_panes(2);
    let mut seq = SubplotSequence::new(surface);
    seq.add(panes[0]).unwrap();
    seq.show().unwrap();

    seq.add(panes[1]).unwrap();
    assert_eq!(seq.surface().visible(), vec![0]);
    assert_eq!(seq.surface().indicator(), indicator(1, 2));

    assert!(seq.navigate(NavCommand::Advance));
    assert_eq!(seq.surface().visible(), vec![1]);
    assert_eq!(seq.surface().indicator(), indicator(2, 2));
    assert!(!seq.navigate(NavCommand::Advance));
}

#[test]
fn test_navigate_before_show_is_noop() {
    let (surface, panes) = ScriptedSurface::with_panes(2);
    let mut seq = SubplotSequence::new(surface);
    seq.add(panes[0]).unwrap();
    seq.add(panes[1]).unwrap();
    assert!(!seq.navigate(NavCommand::Advance));
    assert_eq!(seq.surface().visibility_calls, 0);
}

#[test]
fn test_nav_command_from_key() {
    assert_eq!(NavCommand::from_key(InputKey::Right), Some(NavCommand::Advance));
    assert_eq!(NavCommand::from_key(InputKey::Down), Some(NavCommand::Advance));
    assert_eq!(NavCommand::from_key(InputKey::Left), Some(NavCommand::Retreat));
    assert_eq!(NavCommand::from_key(InputKey::Up), Some(NavCommand::Retreat));
    assert_eq!(NavCommand::from_key(InputKey::Home), None);
}
