//! Tweet records and the recent/past bundle handed to the scorer

use chrono::NaiveDateTime;

/// Minimum number of tweets (recent + past) required to build a bundle
pub const MIN_TWEETS: usize = 5;

/// Fetch size: the most recent tweet plus 20 historical ones
pub const TWEET_FETCH_LIMIT: usize = 21;

/// A single stored tweet
#[derive(Debug, Clone, PartialEq)]
pub struct TweetRecord {
    pub tweet_id: String,
    pub body: String,
    pub created_at: NaiveDateTime,
    pub author_handle: String,
}

/// The newest tweet of a handle together with its predecessors
///
/// Only constructible through [`TweetBundle::from_records`], so a bundle always holds at
/// least [`MIN_TWEETS`] records and `past_tweets` is ordered newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct TweetBundle {
    recent_tweet: TweetRecord,
    past_tweets: Vec<TweetRecord>,
}

impl TweetBundle {
    /// Build a bundle from a fetched batch, or `None` if the batch is too small
    pub fn from_records(mut records: Vec<TweetRecord>) -> Option<Self> {
        if records.len() < MIN_TWEETS {
            return None;
        }

        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let mut iter = records.into_iter();
        let recent_tweet = iter.next()?;

        Some(Self {
            recent_tweet,
            past_tweets: iter.collect(),
        })
    }

    pub fn recent_tweet(&self) -> &TweetRecord {
        &self.recent_tweet
    }

    pub fn past_tweets(&self) -> &[TweetRecord] {
        &self.past_tweets
    }

    /// Creation time of the recent tweet; price history is fetched up to this point
    pub fn anchor_time(&self) -> NaiveDateTime {
        self.recent_tweet.created_at
    }

    pub fn len(&self) -> usize {
        1 + self.past_tweets.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}
