//! Core data models for profile-trust
//!
//! These models carry the slice of a profile record that the scorers and
//! the lockout state machine read and write. Field names serialize in
//! camelCase so a host can round-trip the stored document unchanged.

use crate::error::TrustResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Default credibility score for a fresh account
pub const DEFAULT_CREDIBILITY_SCORE: u8 = 70;

/// Default behavior index for a fresh account
pub const DEFAULT_BEHAVIOR_INDEX: u8 = 85;

/// Opaque account identifier, used as the lockout store key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for AccountId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A profile prompt and the user's answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub prompt: String,
    pub answer: String,
}

impl Prompt {
    pub fn new(prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            answer: answer.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipGoal {
    Casual,
    Serious,
    Marriage,
    Unsure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WantsChildren {
    Yes,
    No,
    Maybe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
    Never,
    Rarely,
    Sometimes,
    Often,
    Daily,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialLevel {
    Homebody,
    Sometimes,
    Social,
    VerySocial,
}

/// Shared scale for drinking and smoking habits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitFrequency {
    Never,
    Rarely,
    Socially,
    Regularly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Diet {
    Omnivore,
    Vegetarian,
    Vegan,
    Pescatarian,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoliticalViews {
    Liberal,
    Moderate,
    Conservative,
    Other,
    PreferNotToSay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReligiousViews {
    Agnostic,
    Atheist,
    Buddhist,
    Christian,
    Hindu,
    Jewish,
    Muslim,
    Other,
    PreferNotToSay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoveLanguage {
    PhysicalTouch,
    WordsOfAffirmation,
    ActsOfService,
    QualityTime,
    ReceivingGifts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommunicationStyle {
    Texter,
    Caller,
    VideoChat,
    InPerson,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseTime {
    Immediate,
    WithinHours,
    WithinDay,
    WhenConvenient,
}

/// Optional questionnaire answers attached to a profile
///
/// Every field is optional; only populated answers count toward
/// profile completeness.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Questionnaire {
    // Demographics
    pub height: Option<u32>,
    pub education: Option<String>,
    pub occupation: Option<String>,
    pub relationship_goals: Option<RelationshipGoal>,
    pub has_children: Option<bool>,
    pub wants_children: Option<WantsChildren>,

    // Lifestyle
    pub fitness_level: Option<FitnessLevel>,
    pub social_level: Option<SocialLevel>,
    pub drinking_habits: Option<HabitFrequency>,
    pub smoking_habits: Option<HabitFrequency>,
    pub diet: Option<Diet>,
    pub political_views: Option<PoliticalViews>,
    pub religious_views: Option<ReligiousViews>,

    // Personality & interests
    pub interests: Vec<String>,
    pub love_languages: Vec<LoveLanguage>,
    pub deal_breakers: Vec<String>,

    // Communication
    pub communication_style: Option<CommunicationStyle>,
    pub response_time: Option<ResponseTime>,
}

impl Questionnaire {
    /// Number of answered fields
    ///
    /// Blank strings, zero height and empty lists are not answers.
    pub fn populated_fields(&self) -> usize {
        let text = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());

        [
            self.height.is_some_and(|h| h > 0),
            text(&self.education),
            text(&self.occupation),
            self.relationship_goals.is_some(),
            self.has_children.is_some(),
            self.wants_children.is_some(),
            self.fitness_level.is_some(),
            self.social_level.is_some(),
            self.drinking_habits.is_some(),
            self.smoking_habits.is_some(),
            self.diet.is_some(),
            self.political_views.is_some(),
            self.religious_views.is_some(),
            !self.interests.is_empty(),
            !self.love_languages.is_empty(),
            !self.deal_breakers.is_empty(),
            self.communication_style.is_some(),
            self.response_time.is_some(),
        ]
        .into_iter()
        .filter(|answered| *answered)
        .count()
    }
}

/// Interaction-quality counters that feed the behavior index and the
/// credibility score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BehaviorMetrics {
    pub ghosting_incidents: u32,
    pub report_count: u32,
    pub inappropriate_messages: u32,
    pub positive_interactions: u32,
    pub conversation_length: u32,
    pub mutual_matches: u32,
    /// Percentage in [0, 100]
    pub response_rate: f64,
    /// Mean rating in [0, 5]
    pub average_rating: f64,
    pub total_ratings: u32,
    pub profile_views: u32,
    pub likes_given: u32,
    pub likes_received: u32,
}

impl Default for BehaviorMetrics {
    fn default() -> Self {
        Self {
            ghosting_incidents: 0,
            report_count: 0,
            inappropriate_messages: 0,
            positive_interactions: 0,
            conversation_length: 0,
            mutual_matches: 0,
            response_rate: 100.0,
            average_rating: 5.0,
            total_ratings: 0,
            profile_views: 0,
            likes_given: 0,
            likes_received: 0,
        }
    }
}

/// Failed-login counter and lock deadline
///
/// Mutated only by the lockout manager; general profile edits never
/// touch it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LockoutState {
    pub login_attempts: u32,
    pub lock_until: Option<DateTime<Utc>>,
}

impl LockoutState {
    /// True when a lock deadline is set and still in the future
    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        self.lock_until.is_some_and(|until| until > now)
    }
}

/// The profile record under scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Account {
    pub id: AccountId,
    pub created_at: Option<DateTime<Utc>>,

    // Profile content
    pub name: String,
    pub age: Option<u32>,
    pub job: String,
    pub school: String,
    pub images: Vec<String>,
    pub prompts: Vec<Prompt>,
    pub questionnaire: Questionnaire,

    pub behavior_metrics: BehaviorMetrics,

    // Derived scores
    pub profile_completeness: u8,
    pub credibility_score: u8,
    pub behavior_index: u8,
    #[serde(alias = "accountAge")]
    pub account_age_days: u32,

    #[serde(flatten)]
    pub lockout: LockoutState,
}

impl Default for Account {
    fn default() -> Self {
        Self {
            id: AccountId::default(),
            created_at: None,
            name: String::new(),
            age: None,
            job: String::new(),
            school: String::new(),
            images: Vec::new(),
            prompts: Vec::new(),
            questionnaire: Questionnaire::default(),
            behavior_metrics: BehaviorMetrics::default(),
            profile_completeness: 0,
            credibility_score: DEFAULT_CREDIBILITY_SCORE,
            behavior_index: DEFAULT_BEHAVIOR_INDEX,
            account_age_days: 0,
            lockout: LockoutState::default(),
        }
    }
}

impl Account {
    /// Fresh account with defaults, created at `created_at`
    pub fn new(id: impl Into<AccountId>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            created_at: Some(created_at),
            ..Default::default()
        }
    }

    /// Whether the account is locked out at `now`
    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        self.lockout.is_locked(now)
    }
}

/// Read an account document (JSON) from disk
pub fn load_account(path: &Path) -> TrustResult<Account> {
    let content = std::fs::read_to_string(path)?;
    let account: Account = serde_json::from_str(&content)?;
    Ok(account)
}
