pub mod achievements;
pub mod applications;
pub mod certificates;
pub mod education;
pub mod experiences;
pub mod internships;
pub mod notifications;
pub mod profile;
pub mod projects;
pub mod public_profile;
pub mod resume;
pub mod socials;
