//! Flat per-lane generator state
//!
//! Two contiguous buffers, never one object per lane:
//! - `words`: `lane_count × state_words_per_lane` state words
//! - `cursors`: `lane_count × cursor_words_per_lane` index words
//!
//! Lane `i` owns `words[i * state_words_per_lane..(i + 1) * state_words_per_lane]`
//! and `cursors[i * cursor_words_per_lane..(i + 1) * cursor_words_per_lane]`.

use crate::error::ConfigError;

/// Flat state shared by every lane of one dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorState {
    lane_count: usize,
    state_words_per_lane: usize,
    cursor_words_per_lane: usize,
    words: Vec<u32>,
    cursors: Vec<u32>,
}

impl GeneratorState {
    /// Zeroed state for `lane_count` lanes
    ///
    /// # Errors
    /// - [`ConfigError::TooManyLanes`] if either buffer size overflows
    pub(crate) fn zeroed(
        lane_count: usize,
        state_words_per_lane: usize,
        cursor_words_per_lane: usize,
    ) -> Result<Self, ConfigError> {
        let too_many = ConfigError::TooManyLanes { lanes: lane_count };
        let words = lane_count
            .checked_mul(state_words_per_lane)
            .ok_or_else(|| too_many.clone())?;
        let cursors = lane_count
            .checked_mul(cursor_words_per_lane)
            .ok_or(too_many)?;

        Ok(Self {
            lane_count,
            state_words_per_lane,
            cursor_words_per_lane,
            words: vec![0; words],
            cursors: vec![0; cursors],
        })
    }

    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    pub fn state_words_per_lane(&self) -> usize {
        self.state_words_per_lane
    }

    pub fn cursor_words_per_lane(&self) -> usize {
        self.cursor_words_per_lane
    }

    /// All state words, lane-major
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// All cursor words, lane-major
    pub fn cursors(&self) -> &[u32] {
        &self.cursors
    }

    /// State words of one lane
    pub fn lane_words(&self, lane: usize) -> &[u32] {
        let start = lane * self.state_words_per_lane;
        &self.words[start..start + self.state_words_per_lane]
    }

    /// Mutable view of a single lane, or None if the id is out of range
    pub fn lane_mut(&mut self, lane: usize) -> Option<LaneState<'_>> {
        if lane >= self.lane_count {
            return None;
        }

        let words_start = lane * self.state_words_per_lane;
        let cursor_start = lane * self.cursor_words_per_lane;

        Some(LaneState {
            id: lane,
            words: &mut self.words[words_start..words_start + self.state_words_per_lane],
            cursor: &mut self.cursors[cursor_start..cursor_start + self.cursor_words_per_lane],
        })
    }

    /// Split the state into one disjoint mutable view per lane, in lane order
    pub fn lanes_mut(&mut self) -> Vec<LaneState<'_>> {
        let cursor_words = self.cursor_words_per_lane;
        let mut cursors = self.cursors.chunks_mut(cursor_words.max(1));

        self.words
            .chunks_mut(self.state_words_per_lane)
            .enumerate()
            .map(|(id, words)| {
                let cursor: &mut [u32] = if cursor_words == 0 {
                    &mut []
                } else {
                    cursors.next().unwrap_or_default()
                };
                LaneState { id, words, cursor }
            })
            .collect()
    }
}

/// Exclusive view of one lane's state and cursor
#[derive(Debug)]
pub struct LaneState<'a> {
    id: usize,
    words: &'a mut [u32],
    cursor: &'a mut [u32],
}

impl<'a> LaneState<'a> {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn words(&self) -> &[u32] {
        &*self.words
    }

    pub fn cursor(&self) -> &[u32] {
        &*self.cursor
    }

    /// Both halves at once, as the algorithms need them
    pub(crate) fn split_mut(&mut self) -> (&mut [u32], &mut [u32]) {
        (&mut *self.words, &mut *self.cursor)
    }
}
