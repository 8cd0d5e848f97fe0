//! Wing stat derivation.

use super::{WingSegment, Wings};
use crate::catalog::{SkinType, WingDeck};
use crate::config::DesignConfig;
use crate::parts::AircraftType;
use crate::rounding::floor_eps;
use crate::stats::{EraNote, Stats};

/// Induced drag of a wing before skin effects, never below one.
fn shape_drag(area: f64, span: f64) -> f64 {
    (6.0 * area * area / (span * span)).max(1.0)
}

/// Strain a wing puts on the frame; wings never add strain capacity.
fn wing_strain(segment: &WingSegment) -> f64 {
    (-(2.0 * segment.span + segment.area - 10.0)).min(0.0)
}

fn drag_area(segment: &WingSegment) -> f64 {
    if segment.gull {
        floor_eps(DesignConfig::GULL_AREA_FACTOR * segment.area)
    } else {
        segment.area
    }
}

impl Wings {
    fn skin(&self, segment: &WingSegment) -> &SkinType {
        &self.catalog.skins()[segment.surface]
    }

    /// Drag of full wing `segment` after skin and tandem effects, unrounded.
    fn full_wing_drag(&self, segment: &WingSegment, base: f64, shared_deck: bool) -> f64 {
        let skin = self.skin(segment);
        let mut drag = base + shape_drag(drag_area(segment), segment.span);
        drag = (drag * skin.dragfactor).max(1.0);
        if self.layout().inline && shared_deck {
            drag = floor_eps(DesignConfig::INLINE_DRAG_FACTOR * drag).max(1.0);
        }
        drag
    }

    /// Stat contribution of a single full wing, before the whole-design effects.
    fn full_wing_stats(&self, segment: &WingSegment, shared_deck: bool) -> Stats {
        let skin = self.skin(segment);
        let mut stats = skin.stats.multiply(segment.area);
        stats.wing_area = segment.area;
        stats.max_strain += wing_strain(segment);
        if self.aircraft_type == AircraftType::OrnithopterBuzzer {
            stats.max_strain += wing_strain(segment);
        }
        stats.max_strain *= skin.strainfactor;
        if skin.transparent {
            stats.visibility += 1.0;
        }
        stats.drag = self.full_wing_drag(segment, stats.drag, shared_deck);
        stats.lat_stab += segment.dihedral - segment.anhedral;
        stats.lift_bleed += segment.dihedral + segment.anhedral;
        stats.round();
        stats
    }

    fn mini_wing_stats(&self, segment: &WingSegment) -> Stats {
        let skin = self.skin(segment);
        let mut stats = skin.stats.multiply(segment.area);
        stats.wing_area = segment.area;
        stats.max_strain += wing_strain(segment);
        stats.max_strain *= skin.strainfactor;
        stats.drag = (stats.drag + 6.0 * segment.area * segment.area
            / (segment.span * segment.span))
            .max(1.0);
        stats.drag = (stats.drag * skin.dragfactor).max(1.0);
        stats.lat_stab += segment.dihedral - segment.anhedral;
        stats.lift_bleed += segment.dihedral + segment.anhedral;
        stats.round();
        stats
    }

    /// Drag saved by the longest-wing bonus, when it applies.
    fn longest_wing_saving(&self, longest_drag: f64) -> f64 {
        let sesquiplane = self.sesquiplane();
        if !(sesquiplane.is || self.is_monoplane()) {
            return 0.0;
        }
        sesquiplane.deck.map_or(0.0, |deck| {
            floor_eps((1.0 - self.catalog.longest()[deck].dragfactor) * longest_drag)
        })
    }

    pub fn part_stats(&self) -> Stats {
        let deck_count = self.full_deck_counts();
        let mut stats = Stats::new();
        let mut longest_span = self.rotor_span;
        let mut longest_drag = 0.0;

        for (i, segment) in self.wing_list.iter().enumerate() {
            longest_span = longest_span.max(segment.span);
            if i > 0 {
                stats.control += 3.0;
                stats.lift_bleed += 5.0;
                stats.visibility -= 1.0;
            }

            let mut wing = self.full_wing_stats(segment, deck_count[segment.deck] > 1);
            stats = stats.add(&self.catalog.decks()[segment.deck].stats);

            if longest_span == segment.span {
                longest_drag = wing.drag;
            }
            // Treated paper savings are reported separately.
            wing.mass = wing.mass.max(0.0);
            stats = stats.add(&wing);
        }

        for (i, segment) in self.mini_wing_list.iter().enumerate() {
            longest_span = longest_span.max(segment.span);
            stats.control += 1.0;
            if i > 0 {
                stats.lift_bleed += 1.0;
            }
            let mut wing = self.mini_wing_stats(segment);
            wing.mass = wing.mass.max(0.0);
            stats = stats.add(&wing);
        }

        stats.control += DesignConfig::NEUTRAL_SPAN - longest_span;
        stats.lat_stab += (longest_span - DesignConfig::NEUTRAL_SPAN).min(0.0);

        let sesquiplane = self.sesquiplane();
        if sesquiplane.is || self.is_monoplane() {
            if let Some(deck) = sesquiplane.deck {
                stats = stats.add(&self.catalog.longest()[deck].stats);
            }
        }
        stats.drag -= self.longest_wing_saving(longest_drag);
        if sesquiplane.is {
            stats.lift_bleed -= 2.0;
            stats.control += 2.0;
        }

        if self.layout().inline {
            for &count in deck_count.iter().filter(|&&count| count > 1) {
                stats.lift_bleed += 3.0 * (count - 1) as f64;
            }
        }

        let polish = self.has_polish_wing();
        if polish {
            stats.visibility += 1.0;
            stats.max_strain += 10.0;
        }
        let inverted = self.inverted_gull_deck();
        if inverted == Some(WingDeck::Gear.index()) {
            stats.max_strain += 10.0;
            stats.crash_safety += 1.0;
        }
        if polish || inverted.is_some() {
            stats.era.push(EraNote::new("Gull Wing", "Coming Storm"));
        }

        if self.is_swept {
            stats.lift_bleed += 5.0;
            stats.lat_stab -= 1.0;
        }

        if self.is_closed {
            let pairs = floor_eps(self.wing_list.len() as f64 / 2.0);
            stats.mass += pairs;
            stats.control -= 5.0 * pairs;
            stats.max_strain += 20.0 * pairs;
        }

        if self.wing_list.len() > 1 {
            stats = stats.add(&self.layout().stats);
        }
        stats
    }

    /// Total wing drag including the longest-wing discount.
    ///
    /// Unlike [`Wings::part_stats`], skin drag is left out: only the induced
    /// drag of each wing is counted.
    pub fn wing_drag(&self) -> f64 {
        let deck_count = self.full_deck_counts();
        let mut drag = 0.0;
        let mut longest_span: f64 = 0.0;
        let mut longest_drag = 0.0;

        for segment in &self.wing_list {
            longest_span = longest_span.max(segment.span);
            let wing = floor_eps(self.full_wing_drag(segment, 0.0, deck_count[segment.deck] > 1));
            if longest_span == segment.span {
                longest_drag = wing;
            }
            drag += wing;
        }
        for segment in &self.mini_wing_list {
            let skin = self.skin(segment);
            let wing = (shape_drag(segment.area, segment.span) * skin.dragfactor).max(1.0);
            drag += floor_eps(wing);
        }

        drag - self.longest_wing_saving(longest_drag)
    }

    /// Mass saved by treated-paper skins, at most a quarter of the aircraft.
    pub fn paper_mass(&self) -> f64 {
        let paper: f64 = self
            .wing_list
            .iter()
            .chain(&self.mini_wing_list)
            .map(|segment| {
                let mut stats = self.skin(segment).stats.multiply(segment.area);
                stats.round();
                stats.mass.min(0.0)
            })
            .sum();
        paper.max(-floor_eps(0.25 * self.plane_mass))
    }
}
