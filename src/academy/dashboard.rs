//! Dashboard assembly

use crate::academy::{
    insights::{Insights, LearningPath, ProgressAnalysis},
    models::{CommunityPost, Course, PostFilter, Progress},
    scoring::{teacher_analytics, TeacherAnalytics},
    store::AcademyStore,
};
use anyhow::Result;
use serde::Serialize;

const DASHBOARD_COURSES: usize = 10;
const DASHBOARD_POSTS: usize = 5;
const TEACHER_COURSES: usize = 20;

#[derive(Debug, Serialize)]
pub struct StudentDashboard {
    pub learning_path: LearningPath,
    pub enrolled_courses: Vec<Course>,
    pub progress: Vec<Progress>,
    pub recent_posts: Vec<CommunityPost>,
    pub ai_insights: ProgressAnalysis,
}

#[derive(Debug, Serialize)]
pub struct TeacherDashboard {
    pub courses: Vec<Course>,
    pub student_progress: Vec<Progress>,
    pub analytics: TeacherAnalytics,
}

pub fn student_dashboard(
    store: &AcademyStore,
    insights: &dyn Insights,
    student_id: &str,
) -> Result<StudentDashboard> {
    let mut progress = store.progress_for_student(student_id)?;
    progress.truncate(DASHBOARD_COURSES);

    Ok(StudentDashboard {
        learning_path: insights.learning_path(student_id),
        enrolled_courses: store.courses_enrolled(student_id, DASHBOARD_COURSES)?,
        progress,
        recent_posts: store.list_posts(&PostFilter::default(), DASHBOARD_POSTS)?,
        ai_insights: insights.analyze_progress(student_id),
    })
}

pub fn teacher_dashboard(store: &AcademyStore, teacher_id: &str) -> Result<TeacherDashboard> {
    let courses = store.courses_by_teacher(teacher_id, TEACHER_COURSES)?;
    let course_ids: Vec<String> = courses.iter().map(|c| c.id.clone()).collect();
    let student_progress = store.progress_for_courses(&course_ids)?;
    let analytics = teacher_analytics(&courses, &student_progress);

    Ok(TeacherDashboard {
        courses,
        student_progress,
        analytics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::academy::{insights::StaticInsights, seed::seed};

    #[test]
    fn test_student_dashboard_from_seed() {
        let store = AcademyStore::new(":memory:").unwrap();
        seed(&store).unwrap();
        store.enroll("course_2", "student_9").unwrap();

        let dashboard = student_dashboard(&store, &StaticInsights, "student_9").unwrap();
        assert_eq!(dashboard.enrolled_courses.len(), 1);
        assert_eq!(dashboard.progress.len(), 1);
        assert_eq!(dashboard.recent_posts.len(), 2);
        assert_eq!(dashboard.learning_path.current_level, "Intermediate");
    }

    #[test]
    fn test_teacher_dashboard_aggregates_course_progress() {
        let store = AcademyStore::new(":memory:").unwrap();
        seed(&store).unwrap();
        let p1 = store.enroll("course_1", "s1").unwrap().unwrap();
        store.enroll("course_3", "s1").unwrap();
        store.enroll("course_3", "s2").unwrap();
        store.enroll("course_2", "s3").unwrap(); // other teacher
        store.update_progress(&p1.id, 60.0, 3.0).unwrap();

        let dashboard = teacher_dashboard(&store, "teacher_1").unwrap();
        assert_eq!(dashboard.courses.len(), 2);
        assert_eq!(dashboard.student_progress.len(), 3);
        assert_eq!(dashboard.analytics.total_students, 2);
        assert_eq!(dashboard.analytics.total_courses, 2);
        assert_eq!(dashboard.analytics.average_completion, 20.0);
        assert_eq!(dashboard.analytics.total_hours_taught, 3.0);
    }
}
