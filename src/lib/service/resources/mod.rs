pub const UNIT_TEMPLATE: &str = include_str!("unit.service");
