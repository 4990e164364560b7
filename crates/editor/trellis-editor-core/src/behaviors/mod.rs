//! Built-in behaviors.

pub mod dynamic_slots;
pub mod preset;
pub mod title_sync;

pub use dynamic_slots::DynamicSlots;
pub use preset::PresetTitle;
pub use title_sync::TitleSync;

use crate::events::NodeBehavior;
use crate::kinds::NodeKind;

/// The stock behavior set.
///
/// Title and preset upkeep install first: the label resolver reads origin
/// titles, so on a shared event the titles must already be settled by the
/// time the dynamic-slots instances run.
pub fn standard() -> Vec<Box<dyn NodeBehavior>> {
    let mut set: Vec<Box<dyn NodeBehavior>> = vec![
        Box::new(TitleSync::new()),
        Box::new(PresetTitle::new()),
    ];
    for kind in NodeKind::ALL {
        if let Some(behavior) = DynamicSlots::for_kind(kind) {
            set.push(Box::new(behavior));
        }
    }
    set
}
