//! Use cases (application services)

pub mod annotate_images;
pub mod deliver_results;
pub mod produce_news;
pub mod produce_quizzes;
pub mod run_pipeline;
pub mod shared;
pub mod verify_quizzes;

#[cfg(test)]
pub(crate) mod test_support;
