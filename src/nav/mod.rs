//! Navigation cursor: which observation date the curve panel shows.
//!
//! The cursor is a single index into the *currently filtered* series,
//! always in `[0, N-1]`. All mutation goes through [`Cursor::apply_event`]
//! (one event) or [`Cursor::apply_cycle`] (one interaction cycle's worth of
//! possibly-competing events, resolved by precedence), so the transition
//! rules are testable without any UI.

use chrono::NaiveDate;

use crate::domain::TimeSeries;
use crate::error::SeriesError;

/// Direction of the Previous/Next buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Abstract interaction events, as translated by the UI layer from raw
/// widget callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    /// A point on the time-series chart was clicked; the index is within
    /// range by construction of the chart.
    PointClicked(usize),
    ButtonPressed(Direction),
    /// The scrub slider moved; in range by construction of its bounds.
    SliderMoved(usize),
    /// An exact date was picked. A miss is an error, never a nearest-date
    /// substitution.
    DatePicked(NaiveDate),
}

/// All events observed in one update cycle.
///
/// When several arrive together, precedence is: button press, then chart
/// click, then slider, then date pick. `resolve` collapses the cycle to at
/// most one event.
#[derive(Debug, Clone, Copy, Default)]
pub struct CycleInput {
    pub button: Option<Direction>,
    pub click: Option<usize>,
    pub slider: Option<usize>,
    pub date: Option<NaiveDate>,
}

impl CycleInput {
    pub fn resolve(self) -> Option<NavEvent> {
        if let Some(direction) = self.button {
            return Some(NavEvent::ButtonPressed(direction));
        }
        if let Some(index) = self.click {
            return Some(NavEvent::PointClicked(index));
        }
        if let Some(index) = self.slider {
            return Some(NavEvent::SliderMoved(index));
        }
        self.date.map(NavEvent::DatePicked)
    }
}

/// The cursor state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
}

impl Cursor {
    /// Initial state for a series of length `len`: the most recent date.
    ///
    /// `len` must be >= 1; an empty filtered series is rejected upstream
    /// before any cursor exists for it.
    pub fn new(len: usize) -> Self {
        assert!(len >= 1, "cursor requires a non-empty series");
        Self { index: len - 1 }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Re-clamp after the active series changed length. Must run before any
    /// transition is applied against the new series.
    pub fn reclamp(&mut self, len: usize) {
        assert!(len >= 1, "cursor requires a non-empty series");
        if self.index >= len {
            self.index = len - 1;
        }
    }

    /// Apply one event against the active series; returns the new index.
    pub fn apply_event(
        &mut self,
        event: NavEvent,
        series: &TimeSeries,
    ) -> Result<usize, SeriesError> {
        let len = series.len();
        assert!(len >= 1, "cursor requires a non-empty series");
        self.reclamp(len);

        let next = match event {
            NavEvent::ButtonPressed(Direction::Previous) => self.index.saturating_sub(1),
            NavEvent::ButtonPressed(Direction::Next) => (self.index + 1).min(len - 1),
            NavEvent::PointClicked(index) | NavEvent::SliderMoved(index) => index.min(len - 1),
            NavEvent::DatePicked(date) => series.index_of_date(date)?,
        };

        // Single assignment per cycle; never observed mid-transition.
        self.index = next;
        Ok(next)
    }

    /// Resolve an interaction cycle by precedence and apply the winner.
    /// A cycle with no events leaves the cursor unchanged (after reclamping).
    pub fn apply_cycle(
        &mut self,
        input: CycleInput,
        series: &TimeSeries,
    ) -> Result<usize, SeriesError> {
        self.reclamp(series.len());
        match input.resolve() {
            Some(event) => self.apply_event(event, series),
            None => Ok(self.index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Observation;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn series_of(len: u32) -> TimeSeries {
        let observations = (1..=len)
            .map(|d| Observation {
                date: date(d),
                y2: 4.0,
                y5: 4.2,
                y10: 4.3,
                y30: 4.5,
            })
            .collect();
        TimeSeries::from_observations(observations)
    }

    #[test]
    fn initializes_to_most_recent_date() {
        assert_eq!(Cursor::new(5).index(), 4);
        assert_eq!(Cursor::new(1).index(), 0);
    }

    #[test]
    fn buttons_clamp_at_both_ends() {
        let series = series_of(2);
        let mut cursor = Cursor::new(series.len());

        assert_eq!(
            cursor
                .apply_event(NavEvent::ButtonPressed(Direction::Next), &series)
                .unwrap(),
            1
        );
        cursor
            .apply_event(NavEvent::ButtonPressed(Direction::Previous), &series)
            .unwrap();
        assert_eq!(
            cursor
                .apply_event(NavEvent::ButtonPressed(Direction::Previous), &series)
                .unwrap(),
            0
        );
    }

    #[test]
    fn button_beats_click_in_same_cycle() {
        let series = series_of(2);
        let mut cursor = Cursor::new(series.len());
        assert_eq!(cursor.index(), 1);

        // Button press and click arrive together: the button wins.
        let cycle = CycleInput {
            button: Some(Direction::Previous),
            click: Some(1),
            ..Default::default()
        };
        assert_eq!(cursor.apply_cycle(cycle, &series).unwrap(), 0);

        // Next cycle: click alone moves the cursor.
        let cycle = CycleInput {
            click: Some(1),
            ..Default::default()
        };
        assert_eq!(cursor.apply_cycle(cycle, &series).unwrap(), 1);
    }

    #[test]
    fn slider_beats_date_pick() {
        let series = series_of(5);
        let mut cursor = Cursor::new(series.len());
        let cycle = CycleInput {
            slider: Some(2),
            date: Some(date(1)),
            ..Default::default()
        };
        assert_eq!(cursor.apply_cycle(cycle, &series).unwrap(), 2);
    }

    #[test]
    fn date_pick_requires_exact_match() {
        let series = series_of(3);
        let mut cursor = Cursor::new(series.len());

        assert_eq!(
            cursor
                .apply_event(NavEvent::DatePicked(date(2)), &series)
                .unwrap(),
            1
        );
        let err = cursor
            .apply_event(NavEvent::DatePicked(date(25)), &series)
            .unwrap_err();
        assert_eq!(err, SeriesError::DateNotFound(date(25)));
        // Failed lookup leaves the cursor where it was.
        assert_eq!(cursor.index(), 1);
    }

    #[test]
    fn reclamps_when_series_shrinks() {
        let mut cursor = Cursor::new(10);
        assert_eq!(cursor.index(), 9);
        cursor.reclamp(4);
        assert_eq!(cursor.index(), 3);
        // Growing back does not move the cursor.
        cursor.reclamp(10);
        assert_eq!(cursor.index(), 3);
    }

    #[test]
    fn index_stays_in_range_under_arbitrary_event_sequences() {
        let series = series_of(7);
        let shrunk = series_of(3);
        let mut cursor = Cursor::new(series.len());

        let events = [
            NavEvent::ButtonPressed(Direction::Next),
            NavEvent::PointClicked(6),
            NavEvent::ButtonPressed(Direction::Previous),
            NavEvent::SliderMoved(0),
            NavEvent::ButtonPressed(Direction::Previous),
            NavEvent::DatePicked(date(5)),
        ];
        for event in events {
            let index = cursor.apply_event(event, &series).unwrap();
            assert!(index < series.len());
        }

        // Stored index (4) exceeds the shrunk length; the next application
        // reclamps before transitioning.
        let index = cursor
            .apply_event(NavEvent::ButtonPressed(Direction::Next), &shrunk)
            .unwrap();
        assert!(index < shrunk.len());
        assert_eq!(index, 2);
    }

    #[test]
    fn empty_cycle_is_a_no_op() {
        let series = series_of(4);
        let mut cursor = Cursor::new(series.len());
        assert_eq!(
            cursor.apply_cycle(CycleInput::default(), &series).unwrap(),
            3
        );
    }
}
