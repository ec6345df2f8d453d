//! Quiz scoring and progress arithmetic

use crate::academy::models::{Course, Progress, ProgressStats, Quiz, QuizResult};
use serde::Serialize;
use std::collections::HashSet;

/// Score answers against a quiz. Answers past the last question are ignored;
/// a quiz without questions scores zero.
pub fn score_quiz(quiz: &Quiz, answers: &[usize]) -> QuizResult {
    let total_questions = quiz.questions.len();
    let correct_answers = quiz
        .questions
        .iter()
        .zip(answers)
        .filter(|(question, answer)| question.correct_answer == **answer)
        .count();

    let score = if total_questions == 0 {
        0.0
    } else {
        correct_answers as f64 / total_questions as f64 * 100.0
    };

    QuizResult {
        score,
        correct_answers,
        total_questions,
        percentage: score,
    }
}

pub fn progress_stats(records: &[Progress]) -> ProgressStats {
    let total_courses = records.len();
    let completion_sum: f64 = records.iter().map(|p| p.completion_percentage).sum();
    let total_time_hours = records.iter().map(|p| p.time_spent_hours).sum();

    ProgressStats {
        total_courses,
        average_completion: completion_sum / total_courses.max(1) as f64,
        total_time_hours,
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TeacherAnalytics {
    pub total_students: usize,
    pub total_courses: usize,
    pub average_completion: f64,
    pub total_hours_taught: f64,
}

/// Aggregate a teacher's courses and the progress records on them.
pub fn teacher_analytics(courses: &[Course], progress: &[Progress]) -> TeacherAnalytics {
    let students: HashSet<&str> = progress.iter().map(|p| p.student_id.as_str()).collect();
    let stats = progress_stats(progress);

    TeacherAnalytics {
        total_students: students.len(),
        total_courses: courses.len(),
        average_completion: stats.average_completion,
        total_hours_taught: stats.total_time_hours,
    }
}

/// Keep a reported completion within 0..=100 and time non-negative.
pub fn sanitize_progress(completion_percentage: f64, time_spent_hours: f64) -> Option<(f64, f64)> {
    if !completion_percentage.is_finite() || !time_spent_hours.is_finite() {
        return None;
    }
    Some((
        completion_percentage.clamp(0.0, 100.0),
        time_spent_hours.max(0.0),
    ))
}
