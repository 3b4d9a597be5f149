mod short_number_cost;
mod short_number_info;

use std::sync::LazyLock;

pub use short_number_cost::ShortNumberCost;
pub use short_number_info::ShortNumberInfo;

pub static SHORT_NUMBER_INFO: LazyLock<ShortNumberInfo> = LazyLock::new(|| {
    ShortNumberInfo::new()
});
