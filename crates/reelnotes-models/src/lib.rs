pub mod movie;
pub mod movie_id;
pub mod review;

pub use movie::{MovieRecord, Person};
pub use movie_id::{InvalidMovieId, MovieId};
pub use review::{Review, ANONYMOUS_AUTHOR, REVIEW_DATE_FORMAT};
