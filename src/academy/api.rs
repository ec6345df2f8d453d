//! Academy API Endpoints
//! Courses, teachers, progress, quizzes, community posts and dashboards

use crate::academy::{
    dashboard::{self, StudentDashboard, TeacherDashboard},
    insights::ProgressAnalysis,
    models::{
        CommunityPost, Course, CourseCreate, CourseFilter, PostCreate, PostFilter, Progress,
        ProgressStats, ProgressUpdate, Quiz, QuizResult, QuizSubmission, QuizSubmissionRequest,
        TeacherFilter, TeacherProfile, TeacherProfileUpdate,
    },
    scoring::{progress_stats, sanitize_progress, score_quiz},
    seed,
    store::now_timestamp,
};
use crate::app::AppState;
use crate::auth::{
    errors::AuthError,
    gate::{require_owner, require_role},
    models::{Account, Identity, Role},
};
use crate::error::ApiError;
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

const POST_LIST_LIMIT: usize = 50;

/// Ownership check for ids that arrive as path strings.
fn require_owner_of(identity: &Identity, raw_id: &str) -> Result<(), AuthError> {
    let owner = Uuid::parse_str(raw_id).map_err(|_| AuthError::Forbidden)?;
    require_owner(identity, owner)
}

fn account_of(state: &AppState, identity: &Identity) -> Result<Account, ApiError> {
    state
        .gate
        .store()
        .find_account_by_id(&identity.account_id)?
        .ok_or_else(|| AuthError::TokenInvalid.into())
}

fn non_empty(field: &str, value: &str) -> Result<String, ApiError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ApiError::BadRequest(format!("{field} must not be empty")));
    }
    Ok(value.to_string())
}

// ---- courses ----

/// GET /api/courses
pub async fn list_courses(
    State(state): State<AppState>,
    WithRejection(Query(filter), _): WithRejection<Query<CourseFilter>, ApiError>,
) -> Result<Json<Vec<Course>>, ApiError> {
    Ok(Json(state.academy.list_courses(&filter)?))
}

/// POST /api/courses (teachers only)
pub async fn create_course(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    WithRejection(Json(payload), _): WithRejection<Json<CourseCreate>, ApiError>,
) -> Result<Json<Course>, ApiError> {
    require_role(&identity, Role::Teacher)?;
    let teacher = account_of(&state, &identity)?;

    let course = Course {
        id: Uuid::new_v4().to_string(),
        title: non_empty("title", &payload.title)?,
        description: payload.description,
        teacher_id: teacher.id.to_string(),
        teacher_name: teacher.full_name,
        subject: non_empty("subject", &payload.subject)?,
        difficulty_level: payload.difficulty_level,
        duration_hours: payload.duration_hours,
        created_at: now_timestamp(),
        image: payload.image,
        enrolled_students: Vec::new(),
        rating: 4.5,
        total_lessons: payload.total_lessons,
    };
    state.academy.insert_course(&course)?;

    Ok(Json(course))
}

/// POST /api/courses/:course_id/enroll (students only)
pub async fn enroll_in_course(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(course_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    require_role(&identity, Role::Student)?;

    let progress = state
        .academy
        .enroll(&course_id, &identity.account_id.to_string())?
        .ok_or(ApiError::NotFound("course"))?;

    Ok(Json(json!({
        "message": "Successfully enrolled in course",
        "progress": progress,
    })))
}

// ---- teachers ----

/// GET /api/teachers
pub async fn list_teachers(
    State(state): State<AppState>,
    WithRejection(Query(filter), _): WithRejection<Query<TeacherFilter>, ApiError>,
) -> Result<Json<Vec<TeacherProfile>>, ApiError> {
    Ok(Json(state.academy.list_teachers(filter.subject.as_deref())?))
}

/// GET /api/teachers/recommendations/:subject
pub async fn teacher_recommendations(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(subject): Path<String>,
) -> Json<Value> {
    let student_id = identity.account_id.to_string();
    let recommendations = state
        .insights
        .recommend_teachers(&subject, Some(&student_id));
    Json(json!({ "recommendations": recommendations }))
}

/// PUT /api/teachers/profile (teachers only, own profile)
pub async fn update_teacher_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    WithRejection(Json(update), _): WithRejection<Json<TeacherProfileUpdate>, ApiError>,
) -> Result<Json<TeacherProfile>, ApiError> {
    require_role(&identity, Role::Teacher)?;
    let user_id = identity.account_id.to_string();

    // No-op when registration already created the profile
    let account = account_of(&state, &identity)?;
    state.academy.create_teacher_profile(&account)?;

    let profile = state
        .academy
        .update_teacher_profile(&user_id, update)?
        .ok_or(ApiError::NotFound("teacher profile"))?;

    info!("👩‍🏫 Teacher profile updated: {}", identity.email);
    Ok(Json(profile))
}

// ---- progress ----

#[derive(Debug, Serialize)]
pub struct ProgressReport {
    pub courses: Vec<Progress>,
    pub stats: ProgressStats,
    pub quiz_submissions: Vec<QuizSubmission>,
    pub ai_analysis: ProgressAnalysis,
}

/// GET /api/progress/:student_id (owner only)
pub async fn get_student_progress(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(student_id): Path<String>,
) -> Result<Json<ProgressReport>, ApiError> {
    require_owner_of(&identity, &student_id)?;

    let courses = state.academy.progress_for_student(&student_id)?;
    let stats = progress_stats(&courses);
    let quiz_submissions = state.academy.submissions_for_student(&student_id)?;

    Ok(Json(ProgressReport {
        courses,
        stats,
        quiz_submissions,
        ai_analysis: state.insights.analyze_progress(&student_id),
    }))
}

/// PUT /api/progress/:progress_id (owning student only)
///
/// Unknown ids and other students' records are both `Forbidden`.
pub async fn update_progress(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(progress_id): Path<String>,
    WithRejection(Json(update), _): WithRejection<Json<ProgressUpdate>, ApiError>,
) -> Result<Json<Progress>, ApiError> {
    let existing = state.academy.get_progress(&progress_id)?;
    let owner = existing.as_ref().map(|p| p.student_id.as_str()).unwrap_or_default();
    require_owner_of(&identity, owner)?;

    let (completion, hours) = sanitize_progress(update.completion_percentage, update.time_spent_hours)
        .ok_or_else(|| ApiError::BadRequest("progress values must be finite numbers".into()))?;

    let progress = state
        .academy
        .update_progress(&progress_id, completion, hours)?
        .ok_or(ApiError::NotFound("progress record"))?;

    Ok(Json(progress))
}

// ---- quizzes ----

/// GET /api/quiz/:course_id
pub async fn get_course_quiz(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<Quiz>, ApiError> {
    let course = state
        .academy
        .get_course(&course_id)?
        .ok_or(ApiError::NotFound("course"))?;

    let quiz = state.academy.get_or_create_quiz(&course.id, || Quiz {
        id: Uuid::new_v4().to_string(),
        course_id: course.id.clone(),
        title: "Course Assessment".to_string(),
        questions: state.insights.quiz_questions(&course.id, &course.subject),
        created_at: now_timestamp(),
    })?;

    Ok(Json(quiz))
}

/// POST /api/quiz/submit (students only)
pub async fn submit_quiz(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    WithRejection(Json(payload), _): WithRejection<Json<QuizSubmissionRequest>, ApiError>,
) -> Result<Json<QuizResult>, ApiError> {
    require_role(&identity, Role::Student)?;

    let quiz = state
        .academy
        .get_quiz(&payload.quiz_id)?
        .ok_or(ApiError::NotFound("quiz"))?;

    let result = score_quiz(&quiz, &payload.answers);
    let submission = QuizSubmission {
        id: Uuid::new_v4().to_string(),
        quiz_id: quiz.id.clone(),
        student_id: identity.account_id.to_string(),
        answers: payload.answers,
        score: result.score,
        completed_at: now_timestamp(),
    };
    state.academy.record_submission(&quiz, &submission)?;

    info!(
        "🧮 Quiz {} submitted by {}: {}/{}",
        quiz.id, identity.email, result.correct_answers, result.total_questions
    );
    Ok(Json(result))
}

// ---- community ----

/// GET /api/community/posts
pub async fn list_posts(
    State(state): State<AppState>,
    WithRejection(Query(filter), _): WithRejection<Query<PostFilter>, ApiError>,
) -> Result<Json<Vec<CommunityPost>>, ApiError> {
    Ok(Json(state.academy.list_posts(&filter, POST_LIST_LIMIT)?))
}

/// POST /api/community/posts
pub async fn create_post(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    WithRejection(Json(payload), _): WithRejection<Json<PostCreate>, ApiError>,
) -> Result<Json<CommunityPost>, ApiError> {
    let author = account_of(&state, &identity)?;

    let post = CommunityPost {
        id: Uuid::new_v4().to_string(),
        author_id: author.id.to_string(),
        author_name: author.full_name,
        title: non_empty("title", &payload.title)?,
        content: non_empty("content", &payload.content)?,
        category: payload.category,
        created_at: now_timestamp(),
        likes: 0,
        replies: Vec::new(),
    };
    state.academy.insert_post(&post)?;

    Ok(Json(post))
}

// ---- dashboards ----

/// GET /api/dashboard/student/:student_id
pub async fn student_dashboard(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(student_id): Path<String>,
) -> Result<Json<StudentDashboard>, ApiError> {
    require_role(&identity, Role::Student)?;
    require_owner_of(&identity, &student_id)?;

    Ok(Json(dashboard::student_dashboard(
        &state.academy,
        state.insights.as_ref(),
        &student_id,
    )?))
}

/// GET /api/dashboard/teacher/:teacher_id
pub async fn teacher_dashboard(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(teacher_id): Path<String>,
) -> Result<Json<TeacherDashboard>, ApiError> {
    require_role(&identity, Role::Teacher)?;
    require_owner_of(&identity, &teacher_id)?;

    Ok(Json(dashboard::teacher_dashboard(&state.academy, &teacher_id)?))
}

// ---- seeding ----

/// POST /api/seed-data (only routed when seeding is enabled)
pub async fn seed_data(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    seed::seed(&state.academy)?;
    Ok(Json(json!({ "message": "Database seeded with sample data successfully" })))
}
