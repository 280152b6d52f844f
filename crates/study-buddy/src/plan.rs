//! Study-plan request parameters, validation, and prompt construction.

use serde::Deserialize;

/// A request field that may arrive as a JSON number or as a string.
///
/// HTML form inputs always submit strings, while JSON clients send either.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    /// True when the value counts as "not provided" (empty string or zero).
    fn is_blank(&self) -> bool {
        match self {
            Self::Number(n) => *n == 0.0,
            Self::Text(s) => s.trim().is_empty(),
        }
    }

    /// Parse as a finite number.
    fn as_number(&self) -> Option<f64> {
        let n = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        n.is_finite().then_some(n)
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Raw study-plan parameters as submitted by a client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanParams {
    /// Subject being studied (e.g., "Algebra").
    #[serde(default)]
    pub class_name: Option<String>,
    /// Hours available per day.
    #[serde(default)]
    pub hours: Option<Scalar>,
    /// Self-rated understanding from 1 to 10.
    #[serde(default)]
    pub level: Option<Scalar>,
}

/// Validation failures for [`PlanParams`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required parameters: className, hours, or level.")]
    MissingParameters,

    #[error("Hours must be a positive number.")]
    InvalidHours,

    #[error("Level must be a number between 1 and 10.")]
    InvalidLevel,
}

/// A validated study-plan request.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    pub class_name: String,
    pub hours: f64,
    pub level: f64,
}

impl PlanParams {
    /// Validate the raw parameters.
    ///
    /// Presence is checked before either number is parsed, so a request that
    /// is missing `level` and has a bad `hours` reports the missing field.
    pub fn validate(&self) -> Result<PlanRequest, ValidationError> {
        let class_name = self
            .class_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let (Some(class_name), Some(hours), Some(level)) = (
            class_name,
            self.hours.as_ref().filter(|h| !h.is_blank()),
            self.level.as_ref().filter(|l| !l.is_blank()),
        ) else {
            return Err(ValidationError::MissingParameters);
        };

        let hours = hours
            .as_number()
            .filter(|h| *h > 0.0)
            .ok_or(ValidationError::InvalidHours)?;

        let level = level
            .as_number()
            .filter(|l| (1.0..=10.0).contains(l))
            .ok_or(ValidationError::InvalidLevel)?;

        Ok(PlanRequest {
            class_name: class_name.to_string(),
            hours,
            level,
        })
    }
}

impl PlanRequest {
    /// Build the generation prompt for this request.
    pub fn prompt(&self) -> String {
        let class = &self.class_name;
        let hours = self.hours;
        let level = self.level;

        format!(
            "
You are an AI Study Buddy. A student is studying {class} and currently has about {hours} hours per day to study. The student rates their understanding as {level}/10. Create a personalized 4-week {class} study plan designed to help them improve steadily.

The plan should be clearly structured by week, with daily learning goals and focus areas. Include short descriptions for each week and what topics are covered.

In addition to the study plan, include exactly 5 high-quality, functional, free YouTube videos, each from a different {class} topic, that the student can use to learn. The videos must:

Be from highly reputable educational channels like Khan Academy, Crash Course, or TED-Ed (at least 4 of the 5 should be from these).

Be 100% accessible and not part of a playlist or shortened URL. Use direct, full-length YouTube video links in the format: https://www.youtube.com/watch?v=VIDEO_ID.

Title each video on its own line as \"YouTube Video #N:\" followed by the video title, where N counts from 1.

Include a brief 1–2 sentence description of each video, what it teaches, and why it’s useful.

Each video link should be on a separate line.

Be recent or still relevant, clearly explained, and not marked as “unavailable.” The AI must check this before recommending.

Format the entire response aesthetically and professionally, like an official syllabus or student guide. Do not use asterisks or code blocks.
"
        )
    }

    /// Key for the generated-plan cache. Class names compare case-insensitively.
    pub fn cache_key(&self) -> String {
        format!(
            "{}|{}|{}",
            self.class_name.to_lowercase(),
            self.hours,
            self.level
        )
    }
}
