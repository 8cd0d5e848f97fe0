//! Wing part: full and miniature wing segments placed on decks.
//!
//! Placement never fails loudly. A segment that would break a deck rule or
//! overflow the stagger layout is refused and the part keeps its previous
//! state; the `can_*` queries tell the host in advance what would be refused.

mod derive;
mod layout;
mod persist;

pub use layout::Sesquiplane;
pub use persist::{LegacyWingSegment, LegacyWingsRecord, WingsRecord};

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AircraftType, PartError, PartKind, Revision};
use crate::catalog::{StaggerLayout, WingCatalog};
use crate::config::DesignConfig;
use crate::rounding::{sanitize_count, sanitize_dimension};

/// One wing (full or miniature).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WingSegment {
    /// Index into the skin table.
    pub surface: usize,
    pub area: f64,
    pub span: f64,
    pub dihedral: f64,
    pub anhedral: f64,
    pub gull: bool,
    /// Index into the deck table.
    pub deck: usize,
}

impl WingSegment {
    pub fn new(surface: usize, area: f64, span: f64, deck: usize) -> Self {
        Self {
            surface,
            area,
            span,
            dihedral: 0.0,
            anhedral: 0.0,
            gull: false,
            deck,
        }
    }

    fn sanitized_hedrals(mut self) -> Self {
        self.dihedral = f64::from(sanitize_count(self.dihedral));
        self.anhedral = f64::from(sanitize_count(self.anhedral));
        self
    }

    /// Integral dimensions, area at least 3 and span at least 1.
    pub(crate) fn sanitized_full(mut self) -> Self {
        self.area = sanitize_dimension(
            self.area,
            DesignConfig::MIN_FULL_WING_AREA,
            DesignConfig::MIN_FULL_WING_AREA,
            f64::INFINITY,
        );
        self.span = sanitize_dimension(
            self.span,
            DesignConfig::MIN_WING_SPAN,
            DesignConfig::MIN_WING_SPAN,
            f64::INFINITY,
        );
        self.sanitized_hedrals()
    }

    /// Integral dimensions, area between 1 and 2 and span at least 1.
    pub(crate) fn sanitized_mini(mut self) -> Self {
        self.area = sanitize_dimension(
            self.area,
            DesignConfig::MAX_MINI_WING_AREA,
            DesignConfig::MIN_MINI_WING_AREA,
            DesignConfig::MAX_MINI_WING_AREA,
        );
        self.span = sanitize_dimension(
            self.span,
            DesignConfig::MIN_WING_SPAN,
            DesignConfig::MIN_WING_SPAN,
            f64::INFINITY,
        );
        self.sanitized_hedrals()
    }
}

#[derive(Clone, Debug)]
pub struct Wings {
    catalog: Arc<WingCatalog>,
    wing_list: Vec<WingSegment>,
    mini_wing_list: Vec<WingSegment>,
    stagger: usize,
    is_swept: bool,
    is_closed: bool,
    plane_mass: f64,
    rotor_span: f64,
    aircraft_type: AircraftType,
    revision: Revision,
}

impl Wings {
    pub fn new(catalog: Arc<WingCatalog>) -> Self {
        let stagger = catalog.default_multi_stagger();
        Self {
            catalog,
            wing_list: Vec::new(),
            mini_wing_list: Vec::new(),
            stagger,
            is_swept: false,
            is_closed: false,
            plane_mass: 0.0,
            rotor_span: 0.0,
            aircraft_type: AircraftType::Airplane,
            revision: Revision::default(),
        }
    }

    pub fn catalog(&self) -> &Arc<WingCatalog> {
        &self.catalog
    }

    fn touch(&mut self) {
        self.revision.bump(PartKind::Wings);
    }

    fn layout(&self) -> &StaggerLayout {
        &self.catalog.staggers()[self.stagger]
    }

    pub fn wing_list(&self) -> &[WingSegment] {
        &self.wing_list
    }

    pub fn mini_wing_list(&self) -> &[WingSegment] {
        &self.mini_wing_list
    }

    // ===== placement =====

    /// Places, replaces or removes the full wing at `index`.
    ///
    /// `Some` replaces the segment at `index` (or appends when `index` is past
    /// the end) after sanitising its dimensions; `None` removes it. A refused
    /// placement leaves the list as it was.
    pub fn set_full_wing(&mut self, index: usize, segment: Option<WingSegment>) {
        let mut list = self.wing_list.clone();
        let replacing = index < list.len();
        if replacing {
            list.remove(index);
        }

        match segment {
            Some(segment) => {
                let segment = segment.sanitized_full();
                if segment.surface >= self.catalog.skins().len()
                    || !self.full_wing_fits(&list, segment.deck)
                {
                    debug!(deck = segment.deck, "full wing placement refused");
                    return;
                }
                list.insert(index.min(list.len()), segment);
                let stagger = self.stagger_for(list.len());
                if list.len() > self.catalog.staggers()[stagger].wing_count {
                    debug!(count = list.len(), stagger, "full wing exceeds layout wing count");
                    return;
                }
            }
            None if !replacing => return,
            None => {}
        }

        self.wing_list = list;
        self.normalize_stagger();
        self.revalidate_flags();
        self.touch();
    }

    /// Places, replaces or removes the miniature wing at `index`.
    pub fn set_mini_wing(&mut self, index: usize, segment: Option<WingSegment>) {
        let mut list = self.mini_wing_list.clone();
        let replacing = index < list.len();
        if replacing {
            list.remove(index);
        }

        match segment {
            Some(segment) => {
                let segment = segment.sanitized_mini();
                if segment.surface >= self.catalog.skins().len()
                    || !self.mini_wing_fits(&self.wing_list, &list, segment.deck)
                {
                    debug!(deck = segment.deck, "mini wing placement refused");
                    return;
                }
                list.insert(index.min(list.len()), segment);
            }
            None if !replacing => return,
            None => {}
        }

        self.mini_wing_list = list;
        self.touch();
    }

    // ===== stagger =====

    /// Layout the part settles on for `count` full wings.
    fn stagger_for(&self, count: usize) -> usize {
        let last = self.catalog.staggers().len() - 1;
        match count {
            0 => self.stagger,
            1 => 0,
            _ if self.aircraft_type == AircraftType::OrnithopterFlutter => last.min(1),
            _ if self.stagger == 0 => self.catalog.default_multi_stagger(),
            _ => self.stagger,
        }
    }

    fn normalize_stagger(&mut self) {
        loop {
            let stagger = self.stagger_for(self.wing_list.len());
            if stagger == self.stagger {
                break;
            }
            self.apply_stagger(stagger);
        }
    }

    /// Switches layout, dropping full wings past its wing count.
    fn apply_stagger(&mut self, index: usize) {
        self.stagger = index;
        let wing_count = self.catalog.staggers()[index].wing_count;
        if self.wing_list.len() > wing_count {
            debug!(
                from = self.wing_list.len(),
                to = wing_count,
                "truncating wings to layout"
            );
            self.wing_list.truncate(wing_count);
        }
    }

    /// Outside inline layouts, drops later full wings that share a deck with
    /// an earlier one (only on limited decks when `limited_only`).
    fn prune_shared_decks(&mut self, limited_only: bool) {
        if self.layout().inline {
            return;
        }
        let mut counts = self.full_deck_counts();
        for i in (0..self.wing_list.len()).rev() {
            let deck = self.wing_list[i].deck;
            if counts[deck] > 1 && (!limited_only || self.catalog.decks()[deck].limited) {
                counts[deck] -= 1;
                debug!(index = i, deck, "pruning wing sharing a deck");
                self.wing_list.remove(i);
            }
        }
    }

    /// Selects stagger layout `index`.
    pub fn set_stagger(&mut self, index: usize) -> Result<(), PartError> {
        PartError::check("stagger", index, self.catalog.staggers().len())?;
        self.apply_stagger(index);
        self.prune_shared_decks(false);
        self.normalize_stagger();
        self.revalidate_flags();
        self.touch();
        Ok(())
    }

    /// Selected layout, `None` while there are no full wings.
    pub fn stagger(&self) -> Option<usize> {
        (!self.wing_list.is_empty()).then_some(self.stagger)
    }

    /// For each layout, whether it can be selected with the current wings.
    pub fn can_stagger(&self) -> Vec<bool> {
        let count = self.wing_list.len();
        let flutter = self.aircraft_type == AircraftType::OrnithopterFlutter;
        (0..self.catalog.staggers().len())
            .map(|i| match count {
                _ if flutter => i == usize::from(count > 1),
                0 => false,
                1 => i == 0,
                _ => i >= 1,
            })
            .collect()
    }

    // ===== flags =====

    fn revalidate_flags(&mut self) {
        if !self.can_closed() {
            self.is_closed = false;
        }
        if !self.can_swept() {
            self.is_swept = false;
        }
    }

    /// A closed wing joins at least two full wings.
    pub fn can_closed(&self) -> bool {
        self.wing_list.len() > 1
    }

    pub fn set_closed(&mut self, closed: bool) {
        self.is_closed = closed && self.can_closed();
        self.touch();
    }

    pub fn closed(&self) -> bool {
        self.is_closed
    }

    pub fn can_swept(&self) -> bool {
        !self.wing_list.is_empty()
    }

    pub fn set_swept(&mut self, swept: bool) {
        self.is_swept = swept && self.can_swept();
        self.touch();
    }

    pub fn swept(&self) -> bool {
        self.is_swept
    }

    // ===== host context =====

    /// Aircraft category. Flutter ornithopters lock multi-wing designs into
    /// the second layout.
    pub fn set_aircraft_type(&mut self, aircraft_type: AircraftType) {
        if aircraft_type == self.aircraft_type {
            return;
        }
        self.aircraft_type = aircraft_type;
        if aircraft_type == AircraftType::OrnithopterFlutter {
            self.normalize_stagger();
            self.revalidate_flags();
        }
        self.touch();
    }

    pub fn aircraft_type(&self) -> AircraftType {
        self.aircraft_type
    }

    /// Rotor span pushed in by the host; counts towards the longest span.
    pub fn set_rotor_span(&mut self, span: f64) {
        if span != self.rotor_span {
            self.rotor_span = span;
            self.touch();
        }
    }

    pub fn rotor_span(&self) -> f64 {
        self.rotor_span
    }

    /// Total aircraft mass; bounds how much mass treated paper can save.
    pub fn set_aircraft_mass(&mut self, mass: f64) {
        if mass != self.plane_mass {
            self.plane_mass = mass;
            self.touch();
        }
    }

    pub fn aircraft_mass(&self) -> f64 {
        self.plane_mass
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DeckType, LongestWingBonus, SkinType, WingDeck};
    use crate::parts::Part;
    use crate::persist::{FormatVersion, PersistError, StreamWriter};
    use crate::stats::{EraNote, Stats};

    const MID: usize = WingDeck::Mid.index();
    const LOW: usize = WingDeck::Low.index();
    const TANDEM: usize = 1;
    const UNSTAGGERED: usize = 2;

    fn skin(name: &str, stats: Stats) -> SkinType {
        SkinType {
            name: name.into(),
            flammable: name == "Cloth",
            stats,
            strainfactor: 1.0,
            dragfactor: 1.0,
            metal: name == "Metal",
            transparent: false,
        }
    }

    fn layout(name: &str, inline: bool, wing_count: usize) -> StaggerLayout {
        StaggerLayout {
            name: name.into(),
            inline,
            wing_count,
            hstab: !inline,
            stats: Stats::default(),
        }
    }

    fn wings() -> Wings {
        let decks = [
            ("Parasol", true),
            ("Shoulder", true),
            ("Mid", true),
            ("Low", false),
            ("Gear", false),
        ];
        let catalog = WingCatalog::new(
            vec![
                skin("Cloth", Stats::default()),
                skin(
                    "Paper",
                    Stats {
                        mass: -1.0,
                        ..Stats::default()
                    },
                ),
                skin("Metal", Stats::default()),
            ],
            vec![
                layout("Monoplane", false, 1),
                layout("Tandem", true, 2),
                layout("Unstaggered", false, 3),
                StaggerLayout {
                    stats: Stats {
                        lift_bleed: 1.0,
                        ..Stats::default()
                    },
                    ..layout("Positive", false, 3)
                },
                layout("Negative", false, 3),
            ],
            decks
                .iter()
                .map(|&(name, limited)| DeckType {
                    name: name.into(),
                    limited,
                    stats: Stats::default(),
                })
                .collect(),
            (0..decks.len())
                .map(|_| LongestWingBonus {
                    dragfactor: 0.5,
                    stats: Stats::default(),
                })
                .collect(),
        )
        .unwrap();
        Wings::new(Arc::new(catalog))
    }

    fn wing(area: f64, span: f64, deck: usize) -> Option<WingSegment> {
        Some(WingSegment::new(0, area, span, deck))
    }

    #[test]
    fn monoplane_gets_longest_wing_discount() {
        let mut wings = wings();
        wings.set_full_wing(0, wing(10.0, 5.0, MID));
        assert!(wings.is_monoplane());
        assert_eq!(wings.stagger(), Some(0));

        let stats = wings.part_stats();
        // 6 * 100 / 25 = 24, half of it refunded by the bonus.
        assert_eq!(stats.drag, 12.0);
        assert_eq!(stats.wing_area, 10.0);
        assert_eq!(stats.control, 3.0);
        assert_eq!(stats.lat_stab, -3.0);
        assert_eq!(stats.max_strain, -10.0);
        assert_eq!(wings.wing_drag(), 12.0);
    }

    #[test]
    fn rotor_span_counts_as_longest_span() {
        let mut wings = wings();
        wings.set_full_wing(0, wing(10.0, 5.0, MID));
        wings.set_rotor_span(10.0);
        let stats = wings.part_stats();
        assert_eq!(stats.control, -2.0);
        assert_eq!(stats.lat_stab, 0.0);
    }

    #[test]
    fn inline_wings_on_one_deck_share_drag() {
        let mut wings = wings();
        wings.set_full_wing(0, wing(8.0, 4.0, MID));
        wings.set_full_wing(1, wing(8.0, 4.0, LOW));
        assert_eq!(wings.stagger(), Some(UNSTAGGERED));
        wings.set_stagger(TANDEM).unwrap();
        wings.set_full_wing(1, wing(8.0, 4.0, MID));

        assert_eq!(wings.full_deck_counts()[MID], 2);
        assert!(wings.is_tandem());
        // 6 * 64 / 16 = 24 per wing, 18 once sharing the deck.
        assert_eq!(wings.wing_drag(), 36.0);
        let stats = wings.part_stats();
        assert_eq!(stats.drag, 36.0);
        // Second wing penalty plus tandem shadowing.
        assert_eq!(stats.lift_bleed, 8.0);
    }

    #[test]
    fn sesquiplane_detected_from_area_ratio() {
        let mut wings = wings();
        wings.set_full_wing(0, wing(10.0, 5.0, WingDeck::Shoulder.index()));
        wings.set_full_wing(1, wing(3.0, 3.0, LOW));
        assert_eq!(
            wings.sesquiplane(),
            Sesquiplane {
                is: true,
                deck: Some(WingDeck::Shoulder.index()),
                super_small: true,
            }
        );

        wings.set_full_wing(1, wing(6.0, 3.0, LOW));
        assert!(!wings.sesquiplane().is);
    }

    #[test]
    fn limited_deck_refuses_second_wing() {
        let mut wings = wings();
        wings.set_full_wing(0, wing(6.0, 6.0, MID));
        let revision = wings.revision;
        assert!(!wings.can_add_full_wing(MID));

        wings.set_full_wing(1, wing(6.0, 6.0, MID));
        assert_eq!(wings.wing_list().len(), 1);
        assert_eq!(wings.revision, revision);

        assert!(wings.can_add_full_wing(LOW));
        wings.set_full_wing(1, wing(6.0, 6.0, LOW));
        assert_eq!(wings.wing_list().len(), 2);
        assert!(wings.revision > revision);
    }

    #[test]
    fn decks_hold_full_or_mini_wings_never_both() {
        let mut wings = wings();
        wings.set_full_wing(0, wing(6.0, 6.0, MID));
        assert!(!wings.can_add_mini_wing(MID));
        wings.set_mini_wing(0, wing(1.0, 2.0, MID));
        assert!(wings.mini_wing_list().is_empty());

        wings.set_mini_wing(0, wing(1.0, 2.0, LOW));
        assert_eq!(wings.mini_wing_list().len(), 1);
        assert!(!wings.can_add_full_wing(LOW));
        assert!(!wings.can_add_mini_wing(LOW));
        wings.set_full_wing(1, wing(6.0, 6.0, LOW));
        assert_eq!(wings.wing_list().len(), 1);
    }

    #[test]
    fn moves_ignore_the_moving_wing() {
        let mut wings = wings();
        wings.set_full_wing(0, wing(6.0, 6.0, WingDeck::Shoulder.index()));
        wings.set_full_wing(1, wing(6.0, 6.0, MID));
        assert!(wings.can_move_full_wing(0, WingDeck::Shoulder.index()));
        assert!(!wings.can_move_full_wing(1, WingDeck::Shoulder.index()));

        wings.set_mini_wing(0, wing(2.0, 2.0, LOW));
        assert!(wings.can_move_mini_wing(0, LOW));
        assert!(!wings.can_move_mini_wing(0, MID));
        assert!(wings.can_move_mini_wing(0, WingDeck::Gear.index()));
    }

    #[test]
    fn out_of_range_deck_is_refused() {
        let mut wings = wings();
        assert!(!wings.can_add_full_wing(9));
        assert!(!wings.can_add_mini_wing(9));
        wings.set_full_wing(0, wing(6.0, 6.0, 9));
        assert!(wings.wing_list().is_empty());
    }

    #[test]
    fn placement_sanitises_dimensions() {
        let mut wings = wings();
        wings.set_full_wing(0, wing(1.5, f64::NAN, MID));
        assert_eq!(wings.wing_list()[0].area, 3.0);
        assert_eq!(wings.wing_list()[0].span, 1.0);

        wings.set_mini_wing(0, wing(5.7, 2.9, LOW));
        assert_eq!(wings.mini_wing_list()[0].area, 2.0);
        assert_eq!(wings.mini_wing_list()[0].span, 2.0);
    }

    #[test]
    fn stagger_change_truncates_and_prunes() {
        let mut wings = wings();
        wings.set_full_wing(0, wing(6.0, 6.0, LOW));
        wings.set_full_wing(1, wing(6.0, 6.0, LOW));
        assert_eq!(wings.wing_list().len(), 2);

        wings.set_stagger(TANDEM).unwrap();
        assert_eq!(wings.wing_list().len(), 2);

        wings.set_stagger(3).unwrap();
        assert_eq!(wings.wing_list().len(), 1);
        assert_eq!(wings.stagger(), Some(0));
        assert!(wings.is_monoplane());
    }

    #[test]
    fn tandem_layout_caps_wing_count() {
        let mut wings = wings();
        for (i, deck) in [WingDeck::Shoulder.index(), MID, LOW].into_iter().enumerate() {
            wings.set_full_wing(i, wing(6.0, 6.0, deck));
        }
        assert_eq!(wings.wing_list().len(), 3);
        wings.set_stagger(TANDEM).unwrap();
        assert_eq!(wings.wing_list().len(), 2);

        wings.set_full_wing(2, wing(6.0, 6.0, LOW));
        assert_eq!(wings.wing_list().len(), 2);
        assert!(wings.set_stagger(7).is_err());
    }

    #[test]
    fn stagger_follows_wing_count() {
        let mut wings = wings();
        assert_eq!(wings.stagger(), None);
        assert_eq!(wings.can_stagger(), vec![false; 5]);

        wings.set_full_wing(0, wing(6.0, 6.0, MID));
        assert_eq!(wings.can_stagger(), vec![true, false, false, false, false]);

        wings.set_full_wing(1, wing(6.0, 6.0, LOW));
        assert_eq!(wings.stagger(), Some(UNSTAGGERED));
        assert_eq!(wings.can_stagger(), vec![false, true, true, true, true]);
        assert!(!wings.is_staggered());
        wings.set_stagger(3).unwrap();
        assert!(wings.is_staggered());

        wings.set_full_wing(1, None);
        assert_eq!(wings.stagger(), Some(0));
    }

    #[test]
    fn flutter_locks_second_layout() {
        let mut wings = wings();
        wings.set_full_wing(0, wing(6.0, 6.0, MID));
        wings.set_full_wing(1, wing(6.0, 6.0, LOW));
        wings.set_aircraft_type(AircraftType::OrnithopterFlutter);
        assert_eq!(wings.stagger(), Some(TANDEM));
        assert_eq!(wings.can_stagger(), vec![false, true, false, false, false]);
    }

    #[test]
    fn buzzer_doubles_wing_strain() {
        let mut wings = wings();
        wings.set_full_wing(0, wing(10.0, 5.0, MID));
        wings.set_aircraft_type(AircraftType::OrnithopterBuzzer);
        assert_eq!(wings.part_stats().max_strain, -20.0);
    }

    #[test]
    fn gull_rules() {
        let mut wings = wings();
        let mut parasol = WingSegment::new(0, 8.0, 6.0, WingDeck::Parasol.index());
        parasol.gull = true;
        assert!(wings.can_gull(WingDeck::Parasol.index()));
        wings.set_full_wing(0, Some(parasol));

        assert!(wings.has_polish_wing());
        assert!(!wings.can_add_full_wing(WingDeck::Shoulder.index()));
        assert!(!wings.can_gull(WingDeck::Shoulder.index()));
        let stats = wings.part_stats();
        assert_eq!(stats.visibility, 1.0);
        assert_eq!(stats.era, vec![EraNote::new("Gull Wing", "Coming Storm")]);

        let mut gear = WingSegment::new(0, 8.0, 6.0, WingDeck::Gear.index());
        gear.gull = true;
        wings.set_full_wing(1, Some(gear));
        assert_eq!(wings.inverted_gull_deck(), Some(WingDeck::Gear.index()));
        assert_eq!(wings.part_stats().crash_safety, 1.0);
    }

    #[test]
    fn inverted_gull_picks_the_bottom_deck() {
        let mut wings = wings();
        let mut low = WingSegment::new(0, 8.0, 6.0, WingDeck::Low.index());
        low.gull = true;
        wings.set_full_wing(0, Some(low));
        assert_eq!(wings.inverted_gull_deck(), Some(WingDeck::Low.index()));

        let mut gear = WingSegment::new(0, 8.0, 6.0, WingDeck::Gear.index());
        gear.gull = true;
        wings.set_full_wing(1, Some(gear));
        assert_eq!(wings.wing_list().len(), 2);
        assert_eq!(wings.inverted_gull_deck(), Some(WingDeck::Gear.index()));
    }

    #[test]
    fn plain_wing_above_blocks_gull() {
        let mut wings = wings();
        wings.set_full_wing(0, wing(8.0, 6.0, WingDeck::Shoulder.index()));
        assert!(!wings.can_gull(WingDeck::Parasol.index()));
        assert!(!wings.can_gull(MID));
        assert!(wings.can_gull(LOW));
        assert_eq!(wings.wing_height(), 3);
    }

    #[test]
    fn closed_and_swept_need_wings() {
        let mut wings = wings();
        wings.set_swept(true);
        assert!(!wings.swept());

        wings.set_full_wing(0, wing(6.0, 6.0, MID));
        wings.set_closed(true);
        assert!(!wings.closed());
        wings.set_swept(true);
        assert!(wings.swept());
        assert!(wings.need_tail());

        wings.set_full_wing(1, wing(6.0, 6.0, LOW));
        wings.set_closed(true);
        assert!(wings.closed());
        let closed = wings.part_stats();
        assert_eq!(closed.max_strain, 20.0 + 2.0 * -8.0);

        wings.set_full_wing(1, None);
        assert!(!wings.closed());
        wings.set_full_wing(0, None);
        assert!(!wings.swept());
    }

    #[test]
    fn geometry_queries() {
        let mut wings = wings();
        wings.set_full_wing(0, Some(WingSegment::new(2, 8.0, 6.0, WingDeck::Parasol.index())));
        wings.set_mini_wing(0, Some(WingSegment::new(0, 2.0, 9.0, LOW)));
        assert_eq!(wings.span(), 9.0);
        assert_eq!(wings.area(), 10.0);
        assert_eq!(wings.metal_area(), 8.0);
        assert!(wings.has_parasol());
        assert!(wings.is_flammable());
    }

    #[test]
    fn treated_paper_saves_bounded_mass() {
        let mut wings = wings();
        wings.set_full_wing(0, Some(WingSegment::new(1, 10.0, 5.0, MID)));
        assert_eq!(wings.part_stats().mass, 0.0);

        wings.set_aircraft_mass(20.0);
        assert_eq!(wings.paper_mass(), -5.0);
        wings.set_aircraft_mass(100.0);
        assert_eq!(wings.paper_mass(), -10.0);
    }

    #[test]
    fn context_setters_bump_only_on_change() {
        let mut wings = wings();
        let start = wings.revision;
        wings.set_rotor_span(0.0);
        wings.set_aircraft_mass(0.0);
        wings.set_aircraft_type(AircraftType::Airplane);
        assert_eq!(wings.revision, start);
        wings.set_aircraft_mass(12.0);
        assert!(wings.revision > start);
    }

    #[test]
    fn json_round_trip() {
        let mut wings = wings();
        wings.set_full_wing(0, wing(10.0, 5.0, MID));
        wings.set_full_wing(1, wing(4.0, 4.0, LOW));
        wings.set_mini_wing(0, wing(2.0, 2.0, WingDeck::Gear.index()));
        wings.set_closed(true);

        let json = wings.to_json().unwrap();
        let mut loaded = self::wings();
        loaded.from_json(&json, FormatVersion::CURRENT).unwrap();
        assert_eq!(loaded.record(), wings.record());
        assert_eq!(loaded.part_stats(), wings.part_stats());
    }

    #[test]
    fn legacy_json_migrates_without_gull() {
        let json = serde_json::json!({
            "wing_list": [
                {
                    "surface": 0, "area": 8.0, "span": 6.0,
                    "dihedral": 1.0, "anhedral": 0.0, "deck": 2
                }
            ],
            "mini_wing_list": [],
            "wing_stagger": 0,
            "is_swept": false,
            "is_closed": false
        });
        let mut wings = wings();
        wings.from_json(&json, FormatVersion::new(11.0)).unwrap();
        assert!(!wings.wing_list()[0].gull);
        assert_eq!(wings.wing_list()[0].dihedral, 1.0);

        let mut strict = self::wings();
        assert!(strict.from_json(&json, FormatVersion::CURRENT).is_err());
    }

    #[test]
    fn legacy_stream_omits_gull() {
        let mut wings = wings();
        wings.set_full_wing(0, wing(8.0, 6.0, MID));

        let mut current = StreamWriter::new(FormatVersion::CURRENT);
        wings.serialize(&mut current);
        let mut legacy = StreamWriter::new(FormatVersion::new(11.0));
        wings.serialize(&mut legacy);
        assert_eq!(current.len(), legacy.len() + 1);

        let mut loaded = self::wings();
        let mut reader = legacy.into_reader();
        loaded.deserialize(&mut reader).unwrap();
        reader.finish().unwrap();
        assert_eq!(loaded.wing_list(), wings.wing_list());
    }

    #[test]
    fn bad_save_leaves_wings_untouched() {
        let mut wings = wings();
        wings.set_full_wing(0, wing(8.0, 6.0, MID));
        let before = wings.record();

        let mut record = before.clone();
        record.wing_list[0].deck = 12;
        let err = wings.apply_record(record).unwrap_err();
        assert!(matches!(err, PersistError::InvalidValue { field: "deck", .. }));
        assert_eq!(wings.record(), before);
    }

    #[test]
    fn loading_drops_conflicting_segments() {
        let mut wings = wings();
        let record = WingsRecord {
            wing_list: vec![
                WingSegment::new(0, 6.0, 6.0, MID),
                WingSegment::new(0, 6.0, 6.0, MID),
                WingSegment::new(0, 6.0, 6.0, LOW),
            ],
            mini_wing_list: vec![
                WingSegment::new(0, 2.0, 2.0, LOW),
                WingSegment::new(0, 2.0, 2.0, WingDeck::Gear.index()),
                WingSegment::new(0, 1.0, 2.0, WingDeck::Gear.index()),
            ],
            wing_stagger: UNSTAGGERED,
            is_swept: false,
            is_closed: true,
        };
        wings.apply_record(record).unwrap();
        assert_eq!(wings.full_deck_counts(), vec![0, 0, 1, 1, 0]);
        assert_eq!(wings.mini_deck_counts(), vec![0, 0, 0, 0, 1]);
        assert!(wings.closed());
    }
}
