//! Academy documents and API payloads

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PostCategory {
    Discussion,
    Question,
    Announcement,
}

impl PostCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostCategory::Discussion => "discussion",
            PostCategory::Question => "question",
            PostCategory::Announcement => "announcement",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub teacher_id: String,
    pub teacher_name: String,
    pub subject: String,
    pub difficulty_level: Difficulty,
    pub duration_hours: u32,
    pub created_at: String,
    pub image: Option<String>,
    #[serde(default)]
    pub enrolled_students: Vec<String>,
    pub rating: f64,
    #[serde(default)]
    pub total_lessons: u32,
}

#[derive(Debug, Deserialize)]
pub struct CourseCreate {
    pub title: String,
    pub description: String,
    pub subject: String,
    pub difficulty_level: Difficulty,
    pub duration_hours: u32,
    pub image: Option<String>,
    #[serde(default)]
    pub total_lessons: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct CourseFilter {
    pub subject: Option<String>,
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeacherProfile {
    pub id: String,
    pub user_id: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub subjects: Vec<String>,
    pub experience_years: u32,
    pub rating: f64,
    pub total_students: u32,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub hourly_rate: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct TeacherProfileUpdate {
    pub subjects: Vec<String>,
    pub experience_years: u32,
    pub bio: Option<String>,
    pub hourly_rate: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TeacherFilter {
    pub subject: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Progress {
    pub id: String,
    pub student_id: String,
    pub course_id: String,
    pub course_title: String,
    pub completion_percentage: f64,
    pub last_accessed: String,
    pub time_spent_hours: f64,
    #[serde(default)]
    pub quiz_scores: Vec<f64>,
}

#[derive(Debug, Deserialize)]
pub struct ProgressUpdate {
    pub completion_percentage: f64,
    pub time_spent_hours: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProgressStats {
    pub total_courses: usize,
    pub average_completion: f64,
    pub total_time_hours: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuizQuestion {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize, // index into options
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Quiz {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub questions: Vec<QuizQuestion>,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct QuizSubmissionRequest {
    pub quiz_id: String,
    pub answers: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuizSubmission {
    pub id: String,
    pub quiz_id: String,
    pub student_id: String,
    pub answers: Vec<usize>,
    pub score: f64,
    pub completed_at: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QuizResult {
    pub score: f64,
    pub correct_answers: usize,
    pub total_questions: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommunityPost {
    pub id: String,
    pub author_id: String,
    pub author_name: String,
    pub title: String,
    pub content: String,
    pub category: PostCategory,
    pub created_at: String,
    pub likes: u32,
    #[serde(default)]
    pub replies: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct PostCreate {
    pub title: String,
    pub content: String,
    pub category: PostCategory,
}

#[derive(Debug, Default, Deserialize)]
pub struct PostFilter {
    pub category: Option<PostCategory>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(
            serde_json::to_string(&Difficulty::Intermediate).unwrap(),
            r#""intermediate""#
        );
        let category: PostCategory = serde_json::from_str(r#""announcement""#).unwrap();
        assert_eq!(category, PostCategory::Announcement);
        assert!(serde_json::from_str::<PostCategory>(r#""rant""#).is_err());
        assert_eq!(Difficulty::Advanced.as_str(), "advanced");
        assert_eq!(PostCategory::Question.as_str(), "question");
    }

    #[test]
    fn test_course_create_defaults_lessons() {
        let body = r#"{
            "title": "Rust 101",
            "description": "Ownership and borrowing",
            "subject": "Programming",
            "difficulty_level": "beginner",
            "duration_hours": 10
        }"#;
        let create: CourseCreate = serde_json::from_str(body).unwrap();
        assert_eq!(create.total_lessons, 0);
        assert!(create.image.is_none());
    }
}
