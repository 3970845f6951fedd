pub mod club_variant;
pub mod normalized_name;

pub use club_variant::ClubVariant;
pub use normalized_name::NormalizedName;
