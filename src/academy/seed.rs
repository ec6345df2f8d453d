//! Sample catalog for demos and local testing

use crate::academy::models::{CommunityPost, Course, Difficulty, PostCategory, TeacherProfile};
use crate::academy::store::{now_timestamp, AcademyStore};
use anyhow::Result;

#[allow(clippy::too_many_arguments)]
fn course(
    id: &str,
    title: &str,
    description: &str,
    teacher: (&str, &str),
    subject: &str,
    difficulty_level: Difficulty,
    (duration_hours, total_lessons): (u32, u32),
    rating: f64,
    enrolled: &[&str],
) -> Course {
    Course {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        teacher_id: teacher.0.to_string(),
        teacher_name: teacher.1.to_string(),
        subject: subject.to_string(),
        difficulty_level,
        duration_hours,
        created_at: now_timestamp(),
        image: None,
        enrolled_students: enrolled.iter().map(|s| s.to_string()).collect(),
        rating,
        total_lessons,
    }
}

pub fn sample_courses() -> Vec<Course> {
    let chen = ("teacher_1", "Dr. Sarah Chen");
    let rodriguez = ("teacher_2", "Prof. Michael Rodriguez");
    vec![
        course(
            "course_1",
            "Introduction to Python Programming",
            "Learn Python from scratch with hands-on projects",
            chen,
            "Programming",
            Difficulty::Beginner,
            (40, 20),
            4.8,
            &["student_1", "student_2"],
        ),
        course(
            "course_2",
            "Data Structures & Algorithms",
            "Master fundamental CS concepts",
            rodriguez,
            "Computer Science",
            Difficulty::Intermediate,
            (60, 30),
            4.7,
            &["student_1"],
        ),
        course(
            "course_3",
            "Web Development with React",
            "Build modern web applications",
            chen,
            "Web Development",
            Difficulty::Intermediate,
            (50, 25),
            4.9,
            &["student_2"],
        ),
    ]
}

pub fn sample_teachers() -> Vec<TeacherProfile> {
    vec![
        TeacherProfile {
            id: "teacher_1".to_string(),
            user_id: "teacher_1".to_string(),
            full_name: "Dr. Sarah Chen".to_string(),
            email: "sarah.chen@novazone.edu".to_string(),
            subjects: vec![
                "Programming".to_string(),
                "Web Development".to_string(),
                "Data Science".to_string(),
            ],
            experience_years: 12,
            rating: 4.9,
            total_students: 150,
            bio: Some("Software engineer turned educator, 12 years in the classroom.".to_string()),
            profile_image: None,
            hourly_rate: Some(75.0),
        },
        TeacherProfile {
            id: "teacher_2".to_string(),
            user_id: "teacher_2".to_string(),
            full_name: "Prof. Michael Rodriguez".to_string(),
            email: "michael.rodriguez@novazone.edu".to_string(),
            subjects: vec![
                "Computer Science".to_string(),
                "Algorithms".to_string(),
                "Mathematics".to_string(),
            ],
            experience_years: 15,
            rating: 4.7,
            total_students: 200,
            bio: Some("Professor specializing in algorithms and theoretical CS.".to_string()),
            profile_image: None,
            hourly_rate: Some(80.0),
        },
    ]
}

pub fn sample_posts() -> Vec<CommunityPost> {
    vec![
        CommunityPost {
            id: "post_1".to_string(),
            author_id: "student_1".to_string(),
            author_name: "Alex Johnson".to_string(),
            title: "Best practices for Python coding?".to_string(),
            content: "I'm new to Python. Which habits should I pick up from the start?"
                .to_string(),
            category: PostCategory::Question,
            created_at: now_timestamp(),
            likes: 5,
            replies: Vec::new(),
        },
        CommunityPost {
            id: "post_2".to_string(),
            author_id: "teacher_1".to_string(),
            author_name: "Dr. Sarah Chen".to_string(),
            title: "New React Course Available!".to_string(),
            content: "My new React course is live, a good fit if you want to learn modern web development."
                .to_string(),
            category: PostCategory::Announcement,
            created_at: now_timestamp(),
            likes: 12,
            replies: Vec::new(),
        },
    ]
}

/// Replace the catalog with the sample data set.
pub fn seed(store: &AcademyStore) -> Result<()> {
    store.replace_catalog(&sample_courses(), &sample_teachers(), &sample_posts())
}
