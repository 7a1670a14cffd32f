//! Route paths exposed to the rating frontend.
//!
//! The integer identifiers produced elsewhere in the crate (MAL anime
//! ids, user ids, rating ordinals) must serialize cleanly into these
//! path segments.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    ActiveUsers,
    /// All anime rated by one user.
    UserRatedAnime { user_id: i64 },
    /// Episode picker for one anime.
    AnimeEpisodes { anime_id: i64 },
    /// One user's episode ratings for one anime.
    AnimeEpisodeRatings { user_id: i64, anime_id: i64 },
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::ActiveUsers => "/active-users".to_string(),
            Route::UserRatedAnime { user_id } => format!("/user/anime/{user_id}"),
            Route::AnimeEpisodes { anime_id } => format!("/anime/{anime_id}"),
            Route::AnimeEpisodeRatings { user_id, anime_id } => {
                format!("/user/anime/{user_id}/{anime_id}")
            }
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
