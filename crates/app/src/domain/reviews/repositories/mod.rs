//! Review Repositories

mod ratings;
mod reviews;

pub(crate) use ratings::PgRatingsRepository;
pub(crate) use reviews::PgReviewsRepository;
