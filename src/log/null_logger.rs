//! Stand-in used without the `logging` feature. Nothing is printed, but `log::max_level()` still
//! follows the configuration so disabled messages cost only a level check.

use crate::log::LogConfiguration;

impl LogConfiguration {
    pub(in crate::log) fn set_config(&mut self) {
        let loudest_module = self.module_levels.values().copied().max();
        log::set_max_level(loudest_module.map_or(self.global_level, |level| {
            level.max(self.global_level)
        }));
    }
}
