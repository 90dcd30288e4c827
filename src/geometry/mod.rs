pub mod hit_testing;

pub use hit_testing::{HIT_TOLERANCE, element_at_point, elements_in_rect};
