use crate::Action;
use std::ops::{Index, IndexMut};

/// One value per [`Action`] for a single cell, in the order of [`Action::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActionRow([f32; Action::COUNT]);

impl ActionRow {
    /// Constructs a row from values in the order of [`Action::ALL`].
    pub fn new(values: [f32; Action::COUNT]) -> Self {
        Self(values)
    }

    /// A row with every entry equal to `value`.
    pub fn splat(value: f32) -> Self {
        Self([value; Action::COUNT])
    }

    /// Value of `act`.
    pub fn get(&self, act: Action) -> f32 {
        self.0[act.index()]
    }

    /// Sets the value of `act`.
    pub fn set(&mut self, act: Action, value: f32) {
        self.0[act.index()] = value;
    }

    /// Values in the order of [`Action::ALL`].
    pub fn values(&self) -> [f32; Action::COUNT] {
        self.0
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f32; Action::COUNT] {
        &mut self.0
    }

    /// The largest value and its action.
    ///
    /// Actions are scanned in the order of [`Action::ALL`] and a later action replaces
    /// the incumbent only if it is strictly greater, so the earliest action wins ties.
    pub fn max(&self) -> (f32, Action) {
        self.scan(|candidate, incumbent| candidate > incumbent)
    }

    /// The smallest value and its action, with the same tie-break as [`ActionRow::max`].
    pub fn min(&self) -> (f32, Action) {
        self.scan(|candidate, incumbent| candidate < incumbent)
    }

    /// Values rescaled so that the minimum maps to `0` and the maximum to `1`.
    ///
    /// A row whose entries are all equal maps to all zeros.
    pub fn normalized(&self) -> [f32; Action::COUNT] {
        let (min, _) = self.min();
        let (max, _) = self.max();
        let range = max - min;
        let mut out = [0f32; Action::COUNT];
        if range > 0.0 {
            for (o, v) in out.iter_mut().zip(self.0.iter()) {
                *o = (v - min) / range;
            }
        }
        out
    }

    fn scan(&self, replaces: impl Fn(f32, f32) -> bool) -> (f32, Action) {
        let mut value = self.0[0];
        let mut act = Action::ALL[0];
        for (v, a) in self.0.iter().zip(Action::ALL.iter()).skip(1) {
            if replaces(*v, value) {
                value = *v;
                act = *a;
            }
        }
        (value, act)
    }
}

impl Index<Action> for ActionRow {
    type Output = f32;

    fn index(&self, act: Action) -> &f32 {
        &self.0[act.index()]
    }
}

impl IndexMut<Action> for ActionRow {
    fn index_mut(&mut self, act: Action) -> &mut f32 {
        &mut self.0[act.index()]
    }
}

impl From<ActionRow> for [f32; Action::COUNT] {
    fn from(row: ActionRow) -> Self {
        row.0
    }
}
