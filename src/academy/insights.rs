//! Learning insights.
//!
//! Every method here currently returns fixed sample data. Callers only depend
//! on the [`Insights`] trait and the payload shapes, so a real recommendation
//! service can replace [`StaticInsights`] without touching handlers.

use crate::academy::models::QuizQuestion;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CourseRecommendation {
    pub course_id: String,
    pub title: String,
    pub priority: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LearningPath {
    pub current_level: String,
    pub recommended_courses: Vec<CourseRecommendation>,
    pub learning_goals: Vec<String>,
    pub estimated_completion: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TeacherRecommendation {
    pub teacher_id: String,
    pub name: String,
    pub match_score: u32,
    pub reason: String,
    pub specialties: Vec<String>,
    pub rating: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProgressAnalysis {
    pub overall_performance: String,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub recommendations: Vec<String>,
    pub next_milestone: String,
    pub motivation_message: String,
}

pub trait Insights: Send + Sync {
    fn learning_path(&self, student_id: &str) -> LearningPath;
    fn recommend_teachers(&self, subject: &str, student_id: Option<&str>)
        -> Vec<TeacherRecommendation>;
    fn quiz_questions(&self, course_id: &str, topic: &str) -> Vec<QuizQuestion>;
    fn analyze_progress(&self, student_id: &str) -> ProgressAnalysis;
}

/// Canned responses; inputs are ignored except where echoed into text.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticInsights;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Insights for StaticInsights {
    fn learning_path(&self, _student_id: &str) -> LearningPath {
        LearningPath {
            current_level: "Intermediate".to_string(),
            recommended_courses: vec![
                CourseRecommendation {
                    course_id: "course_1".to_string(),
                    title: "Advanced Python Programming".to_string(),
                    priority: "high".to_string(),
                    reason: "Builds directly on your completed Python fundamentals".to_string(),
                },
                CourseRecommendation {
                    course_id: "course_2".to_string(),
                    title: "Data Structures & Algorithms".to_string(),
                    priority: "medium".to_string(),
                    reason: "Strengthens your programming foundation".to_string(),
                },
            ],
            learning_goals: strings(&[
                "Master object-oriented programming",
                "Understand algorithm complexity",
                "Build real-world projects",
            ]),
            estimated_completion: "6 weeks".to_string(),
        }
    }

    fn recommend_teachers(
        &self,
        subject: &str,
        _student_id: Option<&str>,
    ) -> Vec<TeacherRecommendation> {
        vec![
            TeacherRecommendation {
                teacher_id: "teacher_1".to_string(),
                name: "Dr. Sarah Chen".to_string(),
                match_score: 95,
                reason: format!("Expert in {subject} with 10+ years experience"),
                specialties: vec![subject.to_string(), "Project-based learning".to_string()],
                rating: 4.9,
            },
            TeacherRecommendation {
                teacher_id: "teacher_2".to_string(),
                name: "Prof. Michael Rodriguez".to_string(),
                match_score: 88,
                reason: "Strong track record with beginner to intermediate students".to_string(),
                specialties: vec![subject.to_string(), "Hands-on approach".to_string()],
                rating: 4.7,
            },
        ]
    }

    fn quiz_questions(&self, _course_id: &str, _topic: &str) -> Vec<QuizQuestion> {
        vec![
            QuizQuestion {
                id: Uuid::new_v4().to_string(),
                question: "What is the main purpose of object-oriented programming?".to_string(),
                options: strings(&[
                    "To make code run faster",
                    "To organize code into reusable objects",
                    "To use less memory",
                    "To write shorter programs",
                ]),
                correct_answer: 1,
                explanation: Some(
                    "OOP organizes code into reusable, maintainable objects.".to_string(),
                ),
            },
            QuizQuestion {
                id: Uuid::new_v4().to_string(),
                question: "Which principle of OOP hides internal implementation?".to_string(),
                options: strings(&["Inheritance", "Polymorphism", "Encapsulation", "Abstraction"]),
                correct_answer: 2,
                explanation: Some(
                    "Encapsulation hides internal state and implementation details.".to_string(),
                ),
            },
        ]
    }

    fn analyze_progress(&self, _student_id: &str) -> ProgressAnalysis {
        ProgressAnalysis {
            overall_performance: "Good".to_string(),
            strengths: strings(&["Problem solving", "Code implementation"]),
            areas_for_improvement: strings(&["Algorithm optimization", "Code documentation"]),
            recommendations: strings(&[
                "Focus more on time complexity analysis",
                "Practice writing clean, documented code",
                "Take on more challenging projects",
            ]),
            next_milestone: "Complete advanced algorithms course".to_string(),
            motivation_message: "You're making excellent progress! Keep up the great work."
                .to_string(),
        }
    }
}
