//! Deck occupancy rules and geometric queries over the wing lists.

use tracing::warn;

use super::{WingSegment, Wings};
use crate::catalog::WingDeck;

/// Outcome of the sesquiplane check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sesquiplane {
    /// The biggest full wing has at least twice the area of the smallest one
    /// and the design is neither a monoplane nor a tandem.
    pub is: bool,
    /// Deck of the uniquely biggest full wing; `None` when two wings tie.
    pub deck: Option<usize>,
    /// The smallest wing spans at most three quarters of the biggest.
    pub super_small: bool,
}

fn deck_counts(decks: usize, segments: &[WingSegment]) -> Vec<usize> {
    let mut counts = vec![0; decks];
    for segment in segments {
        if let Some(count) = counts.get_mut(segment.deck) {
            *count += 1;
        }
    }
    counts
}

fn has_polish_wing(full: &[WingSegment]) -> bool {
    full.iter()
        .any(|w| w.gull && w.deck == WingDeck::Parasol.index())
}

impl Wings {
    pub(crate) fn full_deck_counts(&self) -> Vec<usize> {
        deck_counts(self.catalog.decks().len(), &self.wing_list)
    }

    pub(crate) fn mini_deck_counts(&self) -> Vec<usize> {
        deck_counts(self.catalog.decks().len(), &self.mini_wing_list)
    }

    fn deck_in_range(&self, deck: usize) -> bool {
        if deck < self.catalog.decks().len() {
            return true;
        }
        warn!(deck, decks = self.catalog.decks().len(), "wing deck out of range");
        false
    }

    /// Whether a full wing could join `full` on `deck` next to the current
    /// miniature wings.
    pub(crate) fn full_wing_fits(&self, full: &[WingSegment], deck: usize) -> bool {
        if !self.deck_in_range(deck) {
            return false;
        }
        if !self.layout().inline {
            if deck == WingDeck::Shoulder.index() && has_polish_wing(full) {
                return false;
            }
            let full_count = deck_counts(self.catalog.decks().len(), full);
            if full_count[deck] >= 1 && self.catalog.decks()[deck].limited {
                return false;
            }
        }
        self.mini_deck_counts()[deck] == 0
    }

    /// Whether a miniature wing could join `mini` on `deck`.
    pub(crate) fn mini_wing_fits(
        &self,
        full: &[WingSegment],
        mini: &[WingSegment],
        deck: usize,
    ) -> bool {
        if !self.deck_in_range(deck) {
            return false;
        }
        let decks = self.catalog.decks().len();
        deck_counts(decks, full)[deck] == 0 && deck_counts(decks, mini)[deck] == 0
    }

    pub fn can_add_full_wing(&self, deck: usize) -> bool {
        self.full_wing_fits(&self.wing_list, deck)
    }

    pub fn can_add_mini_wing(&self, deck: usize) -> bool {
        self.mini_wing_fits(&self.wing_list, &self.mini_wing_list, deck)
    }

    /// Whether full wing `index` could move to `deck`, judged as if it were
    /// already lifted off its current deck.
    pub fn can_move_full_wing(&self, index: usize, deck: usize) -> bool {
        let mut scratch = self.wing_list.clone();
        if index < scratch.len() {
            scratch.remove(index);
        }
        self.full_wing_fits(&scratch, deck)
    }

    pub fn can_move_mini_wing(&self, index: usize, deck: usize) -> bool {
        let mut scratch = self.mini_wing_list.clone();
        if index < scratch.len() {
            scratch.remove(index);
        }
        self.mini_wing_fits(&self.wing_list, &scratch, deck)
    }

    // ===== layout queries =====

    /// Several full wings under an inline layout.
    pub fn is_tandem(&self) -> bool {
        self.layout().inline && self.wing_list.len() > 1
    }

    pub fn is_monoplane(&self) -> bool {
        self.wing_list.len() == 1
    }

    pub fn is_staggered(&self) -> bool {
        self.layout().stats.lift_bleed != 0.0
    }

    pub fn need_hstab(&self) -> bool {
        self.layout().hstab
    }

    /// A swept wing can stand in for the tail unless the layout needs a
    /// horizontal stabiliser anyway.
    pub fn need_tail(&self) -> bool {
        self.need_hstab() || !self.is_swept
    }

    /// Height of the highest full wing above the gear deck.
    pub fn wing_height(&self) -> usize {
        self.wing_list
            .iter()
            .map(|w| WingDeck::Gear.index().saturating_sub(w.deck))
            .max()
            .unwrap_or(0)
    }

    fn has_plain_wing_on(&self, deck: usize) -> bool {
        self.wing_list.iter().any(|w| w.deck == deck && !w.gull)
    }

    /// Whether a full wing on `deck` may be gulled. A gull needs the deck
    /// above it clear of straight wings, except in tandem designs; shoulder
    /// wings never gull.
    pub fn can_gull(&self, deck: usize) -> bool {
        let parasol = WingDeck::Parasol.index();
        let shoulder = WingDeck::Shoulder.index();
        if deck == shoulder {
            return false;
        }
        let above = if deck == parasol { shoulder } else { deck - 1 };
        self.is_tandem() || !self.has_plain_wing_on(above)
    }

    pub fn has_polish_wing(&self) -> bool {
        has_polish_wing(&self.wing_list)
    }

    /// Highest deck index carrying a gull wing below the shoulder. Decks are
    /// indexed top to bottom, so this is the gull wing nearest the ground.
    pub fn inverted_gull_deck(&self) -> Option<usize> {
        self.wing_list
            .iter()
            .filter(|w| w.gull && w.deck > WingDeck::Shoulder.index())
            .map(|w| w.deck)
            .max()
    }

    pub fn sesquiplane(&self) -> Sesquiplane {
        let mut biggest_area = 0.0;
        let mut biggest_deck = None;
        let mut biggest_span = 0.0;
        let mut smallest_area = f64::INFINITY;
        let mut smallest_span = 0.0;

        for w in &self.wing_list {
            if w.area > biggest_area {
                biggest_area = w.area;
                biggest_deck = Some(w.deck);
                biggest_span = w.span;
            } else if w.area == biggest_area {
                biggest_deck = None;
            }
            if w.area < smallest_area {
                smallest_area = w.area;
                smallest_span = w.span;
            }
        }

        let is = biggest_area >= 2.0 * smallest_area && !self.is_monoplane() && !self.is_tandem();
        Sesquiplane {
            is,
            deck: biggest_deck,
            super_small: is && 0.75 * biggest_span >= smallest_span,
        }
    }

    // ===== geometry =====

    fn segments(&self) -> impl Iterator<Item = &WingSegment> {
        self.wing_list.iter().chain(&self.mini_wing_list)
    }

    /// Longest span over full and miniature wings, ignoring the rotor.
    pub fn span(&self) -> f64 {
        self.segments().map(|w| w.span).fold(0.0, f64::max)
    }

    pub fn area(&self) -> f64 {
        self.segments().map(|w| w.area).sum()
    }

    pub fn has_parasol(&self) -> bool {
        self.segments().any(|w| w.deck == WingDeck::Parasol.index())
    }

    pub fn metal_area(&self) -> f64 {
        self.segments()
            .filter(|w| self.catalog.skins()[w.surface].metal)
            .map(|w| w.area)
            .sum()
    }

    pub fn is_flammable(&self) -> bool {
        self.segments()
            .any(|w| self.catalog.skins()[w.surface].flammable)
    }
}
