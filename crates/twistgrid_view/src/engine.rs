use std::collections::VecDeque;
use std::fmt;

use cgmath::{InnerSpace, Point2};
use itertools::Itertools;
use rand::Rng;
use twistgrid_core::{
    Arrangement, Axis, Float, Layer, Layout, ObjectId, TurnCode, TurnHistory, quantize_drag,
    scramble,
};
use twistgrid_notation::translate_notation_lossy;
use twistgrid_prefs::Preferences;

use crate::HostServices;
use crate::animation::{SnapAnimation, TurnAnimation};
use crate::gesture::{self, Drag, Grab};


/// Coarse interaction state reported to the host.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum InteractionMode {
    /// Nothing is happening.
    #[default]
    Idle,
    /// The user is dragging a layer, or a released layer is settling.
    InteractiveTurn,
    /// A turn sequence is running.
    ProgrammaticTurn,
}

/// Callback invoked once when a turn sequence completes.
type Callback = Box<dyn FnOnce()>;

/// List of turns to make, with a callback for when they are done.
struct Sequence {
    turns: VecDeque<TurnCode>,
    on_complete: Option<Callback>,
}
impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("turns", &self.turns.iter().join(" "))
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// Interaction state.
#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    /// Pointer is down on an object but has not moved far enough to pick an
    /// axis.
    Grabbed(Grab),
    /// Pointer is rotating a layer.
    Dragging(Drag),
    /// Released layer is settling onto the nearest turn.
    Snapping(SnapAnimation),
    /// Turn sequence is running. `current` is `None` only for a sequence
    /// with no turns, which completes on the next tick.
    RunningSequence {
        sequence: Sequence,
        current: Option<TurnAnimation>,
    },
}

/// Interactive controller for an arrangement of objects.
///
/// The engine owns the logical positions of the objects. The host owns
/// everything visible, and receives rotations through [`HostServices`].
/// Nothing happens between calls: the host forwards pointer input and calls
/// [`Engine::tick()`] once per frame.
pub struct Engine<H> {
    host: H,
    layout: Layout,
    prefs: Preferences,
    history: TurnHistory,
    state: State,
    /// Sequences waiting for the engine to become idle.
    queue: VecDeque<Sequence>,
    /// Timestamp of the last animated frame, or `None` if the next frame is
    /// the first of a new animation.
    last_frame_time: Option<Float>,
}

impl<H: fmt::Debug> fmt::Debug for Engine<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("host", &self.host)
            .field("layout", &self.layout)
            .field("history", &self.history.to_string())
            .field("state", &self.state)
            .field("queue", &self.queue)
            .finish_non_exhaustive()
    }
}

impl<H: HostServices> Engine<H> {
    /// Constructs an engine for `arrangement` and hands every object to the
    /// host.
    pub fn new(arrangement: Arrangement, mut host: H, prefs: Preferences) -> Self {
        let layout = Layout::new(arrangement);
        host.on_objects_added(&layout.spawns());
        log::debug!(
            "created {} objects in a {:?} arrangement",
            layout.slots().len(),
            layout.arrangement().counts(),
        );
        Self {
            host,
            layout,
            prefs,
            history: TurnHistory::new(),
            state: State::Idle,
            queue: VecDeque::new(),
            last_frame_time: None,
        }
    }

    /// Returns the host.
    pub fn host(&self) -> &H {
        &self.host
    }
    /// Returns the host mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
    /// Returns the current object positions.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }
    /// Returns the preferences.
    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }
    /// Replaces the preferences. Animations in progress continue with the
    /// new timings.
    pub fn set_prefs(&mut self, prefs: Preferences) {
        self.prefs = prefs;
    }
    /// Returns every turn committed so far.
    pub fn history(&self) -> &TurnHistory {
        &self.history
    }

    /// Returns the coarse interaction state.
    pub fn mode(&self) -> InteractionMode {
        match self.state {
            State::Idle => InteractionMode::Idle,
            State::Grabbed(_) | State::Dragging(_) | State::Snapping(_) => {
                InteractionMode::InteractiveTurn
            }
            State::RunningSequence { .. } => InteractionMode::ProgrammaticTurn,
        }
    }
    /// Returns whether an animation is running or queued, in which case the
    /// host should keep calling [`Engine::tick()`].
    pub fn is_animating(&self) -> bool {
        matches!(
            self.state,
            State::Snapping(_) | State::RunningSequence { .. }
        ) || !self.queue.is_empty()
    }

    /// Returns the objects currently in a layer, or an empty list if the layer
    /// does not exist.
    pub fn layer_members(&self, axis: Axis, index: u16) -> Vec<ObjectId> {
        self.layout.layer_members(Layer { axis, index })
    }

    /// Handles the pointer being pressed at a screen point.
    pub fn pointer_down(&mut self, point: Point2<Float>) {
        if !matches!(self.state, State::Idle) {
            log::trace!("ignoring grab during {:?}", self.mode());
            return;
        }
        let Some(hit) = self.host.cast_ray(point) else {
            return;
        };
        if !self.layout.contains(hit.object) {
            log::trace!("ignoring grab on unknown object {}", hit.object);
            return;
        }
        let Some((fixed, positive)) = gesture::fixed_normal(hit.normal) else {
            log::trace!("ignoring grab with degenerate normal {:?}", hit.normal);
            return;
        };

        log::trace!("grabbed {} on {fixed} face", hit.object);
        self.host.on_interact_start();
        self.state = State::Grabbed(Grab {
            object: hit.object,
            fixed,
            positive,
            hit_point: hit.point,
            start: point,
            prev: point,
        });
    }

    /// Handles the pointer moving to a screen point.
    pub fn pointer_move(&mut self, point: Point2<Float>) {
        match &mut self.state {
            State::Grabbed(grab) => {
                let threshold_sq = self.prefs.interaction.drag_threshold_sq;
                if !gesture::exceeds_threshold(grab.prev, point, threshold_sq) {
                    return;
                }
                let Some(hit) = self.host.cast_ray(point) else {
                    log::trace!("drag left the arrangement before picking an axis");
                    return;
                };
                let axis = gesture::rotation_axis(grab.fixed, hit.point - grab.hit_point);
                let Some(layer) = self.layout.layer_of(grab.object, axis) else {
                    log::trace!("{} is not in any {axis} layer", grab.object);
                    return;
                };
                let direction = gesture::drag_direction(&self.host, grab, axis);
                log::trace!("dragging {layer} toward {direction:?}");
                self.state = State::Dragging(Drag {
                    layer,
                    members: self.layout.layer_members(layer),
                    direction,
                    prev: point,
                    total: 0.0,
                });
            }

            State::Dragging(drag) => {
                let angle = (point - drag.prev).dot(drag.direction) * self.prefs.interaction.drag_speed;
                drag.prev = point;
                drag.total += angle;
                rotate_objects(
                    &mut self.layout,
                    &mut self.host,
                    &drag.members,
                    drag.layer.axis,
                    angle,
                );
            }

            _ => (),
        }
    }

    /// Handles the pointer being released.
    pub fn pointer_up(&mut self) {
        match std::mem::take(&mut self.state) {
            State::Grabbed(_) => {
                self.host.on_interact_end();
                self.start_next_sequence();
            }

            State::Dragging(drag) => {
                self.host.on_interact_end();
                let axis = drag.layer.axis;
                let square = self.layout.arrangement().is_square_cross_section(axis);
                let quantized = quantize_drag(drag.total, square);
                let codes = quantized.turn_codes(drag.layer);
                if !codes.is_empty() {
                    log::debug!("committed drag turn {}", codes.iter().join(" "));
                }
                self.history.extend(codes);

                let snap = SnapAnimation {
                    layer: drag.layer,
                    members: drag.members,
                    snap_delta: quantized.snap_delta,
                    rotated: 0.0,
                };
                if snap.is_done() {
                    self.finish_snap(snap);
                } else {
                    self.last_frame_time = None;
                    self.state = State::Snapping(snap);
                }
            }

            other => self.state = other,
        }
    }

    /// Advances animations to `timestamp` (in milliseconds) and returns
    /// whether any object moved or the state changed.
    ///
    /// The first frame of each animation advances by zero time.
    pub fn tick(&mut self, timestamp: Float) -> bool {
        let dt = match self.last_frame_time {
            Some(then) => (timestamp - then).max(0.0),
            None => 0.0,
        };
        // Starting a new animation below resets this.
        self.last_frame_time = Some(timestamp);

        let needs_redraw = match std::mem::take(&mut self.state) {
            State::Snapping(mut snap) => {
                let delta = snap.proceed(dt, self.prefs.animation.snap_duration());
                self.rotate(&snap.members, snap.layer.axis, delta);
                if snap.is_done() {
                    self.finish_snap(snap);
                } else {
                    self.state = State::Snapping(snap);
                }
                true
            }

            State::RunningSequence { sequence, current } => {
                self.step_sequence(sequence, current, dt);
                true
            }

            other => {
                self.state = other;
                false
            }
        };

        if !self.is_animating() {
            self.last_frame_time = None;
        }
        needs_redraw
    }

    /// Turns layers according to a list of turn codes such as `x0` or `y2'`,
    /// and calls `on_complete` when done.
    ///
    /// Codes that do not parse or name a layer that does not exist are skipped
    /// with a warning. If the engine is busy, the sequence starts once it is
    /// idle.
    pub fn turn<S: AsRef<str>>(
        &mut self,
        moves: impl IntoIterator<Item = S>,
        on_complete: impl FnOnce() + 'static,
    ) {
        let codes = moves
            .into_iter()
            .filter_map(|s| match s.as_ref().parse::<TurnCode>() {
                Ok(code) => Some(code),
                Err(e) => {
                    log::warn!("skipping move: {e}");
                    None
                }
            })
            .collect_vec();
        self.turn_codes(codes, on_complete);
    }

    /// Same as [`Engine::turn()`], but with codes that are already parsed.
    pub fn turn_codes(
        &mut self,
        codes: impl IntoIterator<Item = TurnCode>,
        on_complete: impl FnOnce() + 'static,
    ) {
        let turns = codes
            .into_iter()
            .filter(|code| {
                let valid = self.layout.is_valid_layer(code.layer);
                if !valid {
                    log::warn!("skipping move {code}: no such layer");
                }
                valid
            })
            .collect();
        self.queue.push_back(Sequence {
            turns,
            on_complete: Some(Box::new(on_complete)),
        });
        if matches!(self.state, State::Idle) {
            self.start_next_sequence();
        }
    }

    /// Turns layers according to face-turn notation such as `R U' F2`.
    ///
    /// Moves that cannot be translated are skipped with a warning.
    pub fn turn_notation(&mut self, notation: &str, on_complete: impl FnOnce() + 'static) {
        let codes = translate_notation_lossy(notation);
        self.turn_codes(codes, on_complete);
    }

    /// Makes `count` random turns and calls `on_complete` when done.
    pub fn scramble(&mut self, count: usize, on_complete: impl FnOnce() + 'static) {
        self.scramble_with_rng(count, &mut rand::rng(), on_complete);
    }
    /// Same as [`Engine::scramble()`], but with a specific random number
    /// generator.
    pub fn scramble_with_rng(
        &mut self,
        count: usize,
        rng: &mut impl Rng,
        on_complete: impl FnOnce() + 'static,
    ) {
        let turns = scramble::random_turns(self.layout.arrangement(), count, rng);
        log::debug!("scrambling with {}", turns.iter().join(" "));
        self.turn_codes(turns, on_complete);
    }

    /// Cancels everything in progress and returns every object to its solved
    /// position.
    ///
    /// Pending sequences are abandoned without calling their callbacks.
    pub fn reset(&mut self) {
        let mut abandoned = self.queue.len();
        self.queue.clear();
        match std::mem::take(&mut self.state) {
            State::Grabbed(_) | State::Dragging(_) => self.host.on_interact_end(),
            State::RunningSequence { .. } => abandoned += 1,
            State::Idle | State::Snapping(_) => (),
        }
        if abandoned > 0 {
            log::warn!("reset abandoned {abandoned} turn sequence(s)");
        }

        self.layout.reset_positions();
        self.sync_all();
        self.history.clear();
        self.last_frame_time = None;
    }

    /// Removes every object from the host and returns the host.
    pub fn destroy(mut self) -> H {
        let ids = self.layout.ids().collect_vec();
        self.host.on_destroy(&ids);
        if !self.queue.is_empty() || matches!(self.state, State::RunningSequence { .. }) {
            log::warn!("destroyed engine with turn sequences pending");
        }
        self.host
    }

    fn rotate(&mut self, ids: &[ObjectId], axis: Axis, radians: Float) {
        rotate_objects(&mut self.layout, &mut self.host, ids, axis, radians);
    }

    fn sync(&mut self, ids: &[ObjectId]) {
        for &id in ids {
            if let Some(slot) = self.layout.slot(id) {
                self.host.sync_object(id, slot.position, slot.orientation);
            }
        }
    }
    fn sync_all(&mut self) {
        for slot in self.layout.slots() {
            self.host.sync_object(slot.id, slot.position, slot.orientation);
        }
    }

    fn finish_snap(&mut self, snap: SnapAnimation) {
        self.layout.snap_to_lattice(&snap.members);
        self.sync(&snap.members);
        log::trace!("{} settled", snap.layer);
        self.state = State::Idle;
        self.start_next_sequence();
    }

    /// Starts the next queued sequence, if there is one. Must only be called
    /// while idle.
    fn start_next_sequence(&mut self) {
        let Some(mut sequence) = self.queue.pop_front() else {
            return;
        };
        let current = self.start_turn(&mut sequence);
        self.last_frame_time = None;
        self.state = State::RunningSequence { sequence, current };
    }

    fn start_turn(&self, sequence: &mut Sequence) -> Option<TurnAnimation> {
        let code = sequence.turns.pop_front()?;
        let square = self
            .layout
            .arrangement()
            .is_square_cross_section(code.axis());
        Some(TurnAnimation::new(
            code,
            self.layout.layer_members(code.layer),
            square,
        ))
    }

    fn step_sequence(&mut self, mut sequence: Sequence, current: Option<TurnAnimation>, dt: Float) {
        let mut current = current;
        if let Some(anim) = &mut current {
            let delta = anim.proceed(dt, self.prefs.animation.turn_duration());
            self.rotate(&anim.members, anim.code.axis(), delta);
            if anim.is_done() {
                log::debug!("committed turn {}", anim.code);
                self.history.push(anim.code);
                // Later turns find their layers by position.
                self.layout.snap_to_lattice(&anim.members);
                current = self.start_turn(&mut sequence);
                if current.is_none() {
                    self.finish_sequence(sequence);
                    return;
                }
            }
            self.state = State::RunningSequence { sequence, current };
        } else {
            self.finish_sequence(sequence);
        }
    }

    fn finish_sequence(&mut self, mut sequence: Sequence) {
        self.layout.snap_all_to_lattice();
        self.sync_all();
        self.state = State::Idle;
        if let Some(on_complete) = sequence.on_complete.take() {
            on_complete();
        }
        self.start_next_sequence();
    }
}

/// Rotates objects in both the layout and the host.
fn rotate_objects(
    layout: &mut Layout,
    host: &mut impl HostServices,
    ids: &[ObjectId],
    axis: Axis,
    radians: Float,
) {
    if radians == 0.0 {
        return;
    }
    layout.rotate(ids, axis, radians);
    let pivot = layout.arrangement().origin();
    for &id in ids {
        host.rotate_object(id, axis, radians, pivot);
    }
}
