//! Engine stat derivation and reliability.

use super::Engine;
use crate::catalog::PushPullKind;
use crate::rounding::floor_eps;
use crate::stats::Stats;

impl Engine {
    /// Derives the engine's stat contribution.
    ///
    /// Reliability is always zero here; it is reported through
    /// [`Engine::update_reliability`] instead.
    pub fn part_stats(&self) -> Stats {
        let archetype = self.archetype();
        let mount = self.mount_type();
        let cowl = &self.catalog.cowls()[self.cowl];

        let mut stats = archetype.stats.clone();
        if archetype.oiltank {
            stats.mass += 1.0;
        }

        match mount.pp_type {
            PushPullKind::Fuselage => stats.lat_stab -= archetype.torque,
            PushPullKind::Wing if self.torque_to_struct => stats.structure -= archetype.torque,
            PushPullKind::Wing => stats.max_strain -= archetype.torque,
        }

        if self.use_pushpull {
            stats.power *= 2.0;
            stats.mass *= 2.0;
            stats.cooling *= 2.0;
            stats.fuel_consumption *= 2.0;
            stats.cost *= 2.0;
            stats.lat_stab *= 2.0;
            stats.structure *= 2.0;
            stats.max_strain *= 2.0;
            if let Some(linkage) = self.catalog.linkage(mount.pp_type) {
                stats.power = floor_eps(linkage.powerfactor * stats.power);
            }
        }

        // Cowls act on the engine itself, before mounting.
        stats = stats.add(&cowl.stats);
        stats.mass += floor_eps(stats.drag * cowl.mpd);
        stats.drag = floor_eps(stats.drag * cowl.ed);
        if self.cowl != 0 && mount.req_tail {
            stats.cost += 2.0;
        }

        if !archetype.pulsejet {
            stats = stats.add(&mount.stats);
            stats.max_strain -= floor_eps(mount.strainfactor * archetype.stats.mass);
            stats.drag += floor_eps(mount.dragfactor * archetype.stats.mass);
        }

        if self.use_driveshafts {
            stats.mass += 1.0;
        }
        stats.cost += f64::from(self.gear_count) + f64::from(self.gear_reliability);

        if self.is_generator {
            stats.charge = floor_eps(2.0 * stats.power / 10.0) + 2.0;
            stats.power = 0.0;
        } else if self.has_alternator {
            stats.charge = floor_eps(stats.power / 10.0) + 1.0;
            stats.mass += 1.0;
            stats.cost += 2.0;
        }

        stats.reliability = 0.0;
        stats
    }

    /// Recomputes the engine's reliability.
    ///
    /// Base reliability, minus one per unrated gear, minus the cooling
    /// shortfall when the engine is cooled at all, plus `extra` from the host.
    pub fn update_reliability(&mut self, extra: f64) {
        let mut total = self.archetype().stats.reliability;
        total -= f64::from(self.gear_count.saturating_sub(self.gear_reliability));
        if self.needs_cooling() {
            total -= f64::from(self.max_cooling().saturating_sub(self.cooling_count));
        }
        self.total_reliability = total + extra;
    }
}
