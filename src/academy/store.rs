//! Academy document storage.
//!
//! Each record is kept as a JSON document next to the few columns queries
//! filter on. List fields (enrolled students, teacher subjects) are searched
//! with SQLite's `json_each`.

use crate::academy::models::{
    CommunityPost, Course, CourseFilter, PostFilter, Progress, Quiz, QuizSubmission,
    TeacherProfile, TeacherProfileUpdate,
};
use crate::auth::models::Account;
use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use parking_lot::Mutex;
use rusqlite::{params, params_from_iter, types::Value, Connection, OpenFlags, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

const SCHEMA_SQL: &str = r#"
PRAGMA journal_mode = WAL;
PRAGMA synchronous = NORMAL;

CREATE TABLE IF NOT EXISTS courses (
    id TEXT PRIMARY KEY,
    teacher_id TEXT NOT NULL,
    subject TEXT NOT NULL,
    difficulty TEXT NOT NULL,
    created_at TEXT NOT NULL,
    doc TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_courses_teacher ON courses(teacher_id);
CREATE INDEX IF NOT EXISTS idx_courses_subject ON courses(subject, difficulty);

CREATE TABLE IF NOT EXISTS teachers (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL UNIQUE,
    doc TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS progress (
    id TEXT PRIMARY KEY,
    student_id TEXT NOT NULL,
    course_id TEXT NOT NULL,
    doc TEXT NOT NULL,
    UNIQUE (student_id, course_id)
);
CREATE INDEX IF NOT EXISTS idx_progress_course ON progress(course_id);

CREATE TABLE IF NOT EXISTS quizzes (
    id TEXT PRIMARY KEY,
    course_id TEXT NOT NULL UNIQUE,
    doc TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS quiz_submissions (
    id TEXT PRIMARY KEY,
    quiz_id TEXT NOT NULL,
    student_id TEXT NOT NULL,
    doc TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_submissions_student ON quiz_submissions(student_id);

CREATE TABLE IF NOT EXISTS community_posts (
    id TEXT PRIMARY KEY,
    category TEXT NOT NULL,
    created_at TEXT NOT NULL,
    doc TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_posts_recent ON community_posts(created_at DESC);
"#;

const COURSE_LIST_LIMIT: usize = 50;
const TEACHER_LIST_LIMIT: usize = 50;
const PROGRESS_LIST_LIMIT: usize = 100;

/// Timestamps sort lexicographically in this format.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn to_doc<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).context("Failed to serialize document")
}

fn query_docs<T: DeserializeOwned>(
    conn: &Connection,
    sql: &str,
    args: Vec<Value>,
) -> Result<Vec<T>> {
    let mut stmt = conn.prepare_cached(sql)?;
    let docs = stmt
        .query_map(params_from_iter(args), |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;

    docs.iter()
        .map(|doc| serde_json::from_str(doc).context("Corrupt document in academy store"))
        .collect()
}

fn query_doc<T: DeserializeOwned>(conn: &Connection, sql: &str, id: &str) -> Result<Option<T>> {
    let doc: Option<String> = conn
        .prepare_cached(sql)?
        .query_row(params![id], |row| row.get(0))
        .optional()?;

    doc.map(|d| serde_json::from_str(&d).context("Corrupt document in academy store"))
        .transpose()
}

/// Academy storage with SQLite backend
pub struct AcademyStore {
    conn: Arc<Mutex<Connection>>,
}

impl AcademyStore {
    pub fn new(db_path: &str) -> Result<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let conn = Connection::open_with_flags(db_path, flags)
            .with_context(|| format!("Failed to open academy database at {}", db_path))?;

        conn.execute_batch(SCHEMA_SQL)
            .context("Failed to initialize academy schema")?;

        info!("📚 Academy store ready at {}", db_path);

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    // ---- courses ----

    pub fn list_courses(&self, filter: &CourseFilter) -> Result<Vec<Course>> {
        let mut sql = String::from("SELECT doc FROM courses WHERE 1 = 1");
        let mut args = Vec::new();
        if let Some(subject) = &filter.subject {
            sql.push_str(" AND subject = ?");
            args.push(Value::Text(subject.clone()));
        }
        if let Some(difficulty) = filter.difficulty {
            sql.push_str(" AND difficulty = ?");
            args.push(Value::Text(difficulty.as_str().to_string()));
        }
        sql.push_str(&format!(" ORDER BY created_at, id LIMIT {COURSE_LIST_LIMIT}"));

        let conn = self.conn.lock();
        query_docs(&conn, &sql, args)
    }

    pub fn insert_course(&self, course: &Course) -> Result<()> {
        let doc = to_doc(course)?;
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO courses (id, teacher_id, subject, difficulty, created_at, doc)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                course.id,
                course.teacher_id,
                course.subject,
                course.difficulty_level.as_str(),
                course.created_at,
                doc,
            ],
        )
        .context("Failed to insert course")?;

        info!("📘 Course created: {} by {}", course.title, course.teacher_name);
        Ok(())
    }

    pub fn get_course(&self, course_id: &str) -> Result<Option<Course>> {
        let conn = self.conn.lock();
        query_doc(&conn, "SELECT doc FROM courses WHERE id = ?1", course_id)
    }

    pub fn courses_by_teacher(&self, teacher_id: &str, limit: usize) -> Result<Vec<Course>> {
        let conn = self.conn.lock();
        query_docs(
            &conn,
            "SELECT doc FROM courses WHERE teacher_id = ?1 ORDER BY created_at, id LIMIT ?2",
            vec![Value::Text(teacher_id.to_string()), Value::Integer(limit as i64)],
        )
    }

    pub fn courses_enrolled(&self, student_id: &str, limit: usize) -> Result<Vec<Course>> {
        let conn = self.conn.lock();
        query_docs(
            &conn,
            "SELECT doc FROM courses
             WHERE EXISTS (
                 SELECT 1 FROM json_each(courses.doc, '$.enrolled_students') WHERE value = ?1
             )
             ORDER BY created_at, id LIMIT ?2",
            vec![Value::Text(student_id.to_string()), Value::Integer(limit as i64)],
        )
    }

    /// Add a student to a course and open their progress record.
    ///
    /// Both steps are idempotent. Returns `None` when the course does not exist.
    pub fn enroll(&self, course_id: &str, student_id: &str) -> Result<Option<Progress>> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;

        let Some(mut course) =
            query_doc::<Course>(&tx, "SELECT doc FROM courses WHERE id = ?1", course_id)?
        else {
            return Ok(None);
        };

        if !course.enrolled_students.iter().any(|s| s == student_id) {
            course.enrolled_students.push(student_id.to_string());
            tx.execute(
                "UPDATE courses SET doc = ?2 WHERE id = ?1",
                params![course.id, to_doc(&course)?],
            )?;
        }

        let progress = Progress {
            id: Uuid::new_v4().to_string(),
            student_id: student_id.to_string(),
            course_id: course.id.clone(),
            course_title: course.title.clone(),
            completion_percentage: 0.0,
            last_accessed: now_timestamp(),
            time_spent_hours: 0.0,
            quiz_scores: Vec::new(),
        };
        tx.execute(
            "INSERT OR IGNORE INTO progress (id, student_id, course_id, doc) VALUES (?1, ?2, ?3, ?4)",
            params![progress.id, progress.student_id, progress.course_id, to_doc(&progress)?],
        )?;

        let stored: Option<String> = tx
            .query_row(
                "SELECT doc FROM progress WHERE student_id = ?1 AND course_id = ?2",
                params![student_id, course_id],
                |row| row.get(0),
            )
            .optional()?;
        tx.commit()?;

        info!("🎓 {} enrolled in {}", student_id, course.title);
        stored
            .map(|d| serde_json::from_str(&d).context("Corrupt progress document"))
            .transpose()
    }

    // ---- teachers ----

    /// Create the empty profile that goes with a teacher account. Idempotent.
    pub fn create_teacher_profile(&self, account: &Account) -> Result<TeacherProfile> {
        let profile = TeacherProfile {
            id: Uuid::new_v4().to_string(),
            user_id: account.id.to_string(),
            full_name: account.full_name.clone(),
            email: account.email.clone(),
            subjects: Vec::new(),
            experience_years: 0,
            rating: 4.5,
            total_students: 0,
            bio: account.bio.clone(),
            profile_image: account.profile_image.clone(),
            hourly_rate: None,
        };

        let conn = self.conn.lock();
        conn.execute(
            "INSERT OR IGNORE INTO teachers (id, user_id, doc) VALUES (?1, ?2, ?3)",
            params![profile.id, profile.user_id, to_doc(&profile)?],
        )
        .context("Failed to insert teacher profile")?;

        query_doc(
            &conn,
            "SELECT doc FROM teachers WHERE user_id = ?1",
            &profile.user_id,
        )?
        .context("Teacher profile missing after insert")
    }

    pub fn list_teachers(&self, subject: Option<&str>) -> Result<Vec<TeacherProfile>> {
        let conn = self.conn.lock();
        match subject {
            Some(subject) => query_docs(
                &conn,
                "SELECT doc FROM teachers
                 WHERE EXISTS (SELECT 1 FROM json_each(teachers.doc, '$.subjects') WHERE value = ?1)
                 ORDER BY id LIMIT ?2",
                vec![
                    Value::Text(subject.to_string()),
                    Value::Integer(TEACHER_LIST_LIMIT as i64),
                ],
            ),
            None => query_docs(
                &conn,
                "SELECT doc FROM teachers ORDER BY id LIMIT ?1",
                vec![Value::Integer(TEACHER_LIST_LIMIT as i64)],
            ),
        }
    }

    pub fn update_teacher_profile(
        &self,
        user_id: &str,
        update: TeacherProfileUpdate,
    ) -> Result<Option<TeacherProfile>> {
        let conn = self.conn.lock();
        let Some(mut profile) = query_doc::<TeacherProfile>(
            &conn,
            "SELECT doc FROM teachers WHERE user_id = ?1",
            user_id,
        )?
        else {
            return Ok(None);
        };

        profile.subjects = update.subjects;
        profile.experience_years = update.experience_years;
        profile.bio = update.bio;
        profile.hourly_rate = update.hourly_rate;

        conn.execute(
            "UPDATE teachers SET doc = ?2 WHERE user_id = ?1",
            params![user_id, to_doc(&profile)?],
        )?;
        debug!("Updated teacher profile for {}", user_id);
        Ok(Some(profile))
    }

    // ---- progress ----

    pub fn progress_for_student(&self, student_id: &str) -> Result<Vec<Progress>> {
        let conn = self.conn.lock();
        query_docs(
            &conn,
            "SELECT doc FROM progress WHERE student_id = ?1 ORDER BY rowid LIMIT ?2",
            vec![
                Value::Text(student_id.to_string()),
                Value::Integer(PROGRESS_LIST_LIMIT as i64),
            ],
        )
    }

    pub fn progress_for_courses(&self, course_ids: &[String]) -> Result<Vec<Progress>> {
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; course_ids.len()].join(", ");
        let sql = format!(
            "SELECT doc FROM progress WHERE course_id IN ({placeholders}) ORDER BY rowid LIMIT {PROGRESS_LIST_LIMIT}"
        );
        let args = course_ids.iter().cloned().map(Value::Text).collect();

        let conn = self.conn.lock();
        query_docs(&conn, &sql, args)
    }

    pub fn get_progress(&self, progress_id: &str) -> Result<Option<Progress>> {
        let conn = self.conn.lock();
        query_doc(&conn, "SELECT doc FROM progress WHERE id = ?1", progress_id)
    }

    /// Overwrite completion and time spent, refreshing `last_accessed`.
    pub fn update_progress(
        &self,
        progress_id: &str,
        completion_percentage: f64,
        time_spent_hours: f64,
    ) -> Result<Option<Progress>> {
        let conn = self.conn.lock();
        let Some(mut progress) =
            query_doc::<Progress>(&conn, "SELECT doc FROM progress WHERE id = ?1", progress_id)?
        else {
            return Ok(None);
        };

        progress.completion_percentage = completion_percentage;
        progress.time_spent_hours = time_spent_hours;
        progress.last_accessed = now_timestamp();

        conn.execute(
            "UPDATE progress SET doc = ?2 WHERE id = ?1",
            params![progress_id, to_doc(&progress)?],
        )?;
        Ok(Some(progress))
    }

    // ---- quizzes ----

    /// Fetch the course quiz, storing the one built by `generate` on first access.
    pub fn get_or_create_quiz(
        &self,
        course_id: &str,
        generate: impl FnOnce() -> Quiz,
    ) -> Result<Quiz> {
        let conn = self.conn.lock();
        if let Some(quiz) = query_doc(&conn, "SELECT doc FROM quizzes WHERE course_id = ?1", course_id)? {
            return Ok(quiz);
        }

        let quiz = generate();
        conn.execute(
            "INSERT INTO quizzes (id, course_id, doc) VALUES (?1, ?2, ?3)",
            params![quiz.id, quiz.course_id, to_doc(&quiz)?],
        )
        .context("Failed to insert quiz")?;
        info!("📝 Generated quiz {} for course {}", quiz.id, course_id);
        Ok(quiz)
    }

    pub fn get_quiz(&self, quiz_id: &str) -> Result<Option<Quiz>> {
        let conn = self.conn.lock();
        query_doc(&conn, "SELECT doc FROM quizzes WHERE id = ?1", quiz_id)
    }

    /// Persist a scored submission and append the score to the student's
    /// progress on the quiz's course, if they are enrolled.
    pub fn record_submission(&self, quiz: &Quiz, submission: &QuizSubmission) -> Result<()> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO quiz_submissions (id, quiz_id, student_id, doc) VALUES (?1, ?2, ?3, ?4)",
            params![
                submission.id,
                submission.quiz_id,
                submission.student_id,
                to_doc(submission)?
            ],
        )?;

        let progress: Option<String> = tx
            .query_row(
                "SELECT doc FROM progress WHERE student_id = ?1 AND course_id = ?2",
                params![submission.student_id, quiz.course_id],
                |row| row.get(0),
            )
            .optional()?;
        if let Some(doc) = progress {
            let mut progress: Progress =
                serde_json::from_str(&doc).context("Corrupt progress document")?;
            progress.quiz_scores.push(submission.score);
            progress.last_accessed = submission.completed_at.clone();
            tx.execute(
                "UPDATE progress SET doc = ?2 WHERE id = ?1",
                params![progress.id, to_doc(&progress)?],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    pub fn submissions_for_student(&self, student_id: &str) -> Result<Vec<QuizSubmission>> {
        let conn = self.conn.lock();
        query_docs(
            &conn,
            "SELECT doc FROM quiz_submissions WHERE student_id = ?1 ORDER BY rowid",
            vec![Value::Text(student_id.to_string())],
        )
    }

    // ---- community ----

    pub fn list_posts(&self, filter: &PostFilter, limit: usize) -> Result<Vec<CommunityPost>> {
        let conn = self.conn.lock();
        match filter.category {
            Some(category) => query_docs(
                &conn,
                "SELECT doc FROM community_posts WHERE category = ?1
                 ORDER BY created_at DESC, rowid DESC LIMIT ?2",
                vec![
                    Value::Text(category.as_str().to_string()),
                    Value::Integer(limit as i64),
                ],
            ),
            None => query_docs(
                &conn,
                "SELECT doc FROM community_posts ORDER BY created_at DESC, rowid DESC LIMIT ?1",
                vec![Value::Integer(limit as i64)],
            ),
        }
    }

    pub fn insert_post(&self, post: &CommunityPost) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO community_posts (id, category, created_at, doc) VALUES (?1, ?2, ?3, ?4)",
            params![post.id, post.category.as_str(), post.created_at, to_doc(post)?],
        )
        .context("Failed to insert community post")?;
        Ok(())
    }

    // ---- seeding ----

    /// Replace all courses and posts with the given sample set.
    ///
    /// Teacher profiles are upserted by id; profiles belonging to registered
    /// teacher accounts are kept.
    pub fn replace_catalog(
        &self,
        courses: &[Course],
        teachers: &[TeacherProfile],
        posts: &[CommunityPost],
    ) -> Result<()> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM courses", [])?;
        tx.execute("DELETE FROM community_posts", [])?;

        for course in courses {
            tx.execute(
                "INSERT INTO courses (id, teacher_id, subject, difficulty, created_at, doc)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    course.id,
                    course.teacher_id,
                    course.subject,
                    course.difficulty_level.as_str(),
                    course.created_at,
                    to_doc(course)?,
                ],
            )?;
        }
        for teacher in teachers {
            tx.execute(
                "DELETE FROM teachers WHERE id = ?1 OR user_id = ?2",
                params![teacher.id, teacher.user_id],
            )?;
            tx.execute(
                "INSERT INTO teachers (id, user_id, doc) VALUES (?1, ?2, ?3)",
                params![teacher.id, teacher.user_id, to_doc(teacher)?],
            )?;
        }
        for post in posts {
            tx.execute(
                "INSERT INTO community_posts (id, category, created_at, doc) VALUES (?1, ?2, ?3, ?4)",
                params![post.id, post.category.as_str(), post.created_at, to_doc(post)?],
            )?;
        }

        tx.commit().context("Failed to commit seed data")?;
        info!(
            "🌱 Seeded {} courses, {} teachers, {} posts",
            courses.len(),
            teachers.len(),
            posts.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::academy::models::{Difficulty, PostCategory, QuizQuestion};
    use crate::auth::models::Role;

    fn store() -> AcademyStore {
        AcademyStore::new(":memory:").expect("Failed to create database")
    }

    fn course(id: &str, subject: &str, difficulty: Difficulty, teacher: &str) -> Course {
        Course {
            id: id.to_string(),
            title: format!("Course {id}"),
            description: "desc".to_string(),
            teacher_id: teacher.to_string(),
            teacher_name: "Teacher".to_string(),
            subject: subject.to_string(),
            difficulty_level: difficulty,
            duration_hours: 10,
            created_at: now_timestamp(),
            image: None,
            enrolled_students: Vec::new(),
            rating: 4.5,
            total_lessons: 5,
        }
    }

    fn post(id: &str, category: PostCategory, created_at: &str) -> CommunityPost {
        CommunityPost {
            id: id.to_string(),
            author_id: "a".to_string(),
            author_name: "Author".to_string(),
            title: id.to_string(),
            content: "content".to_string(),
            category,
            created_at: created_at.to_string(),
            likes: 0,
            replies: Vec::new(),
        }
    }

    fn teacher_account(name: &str) -> Account {
        Account {
            id: Uuid::new_v4(),
            email: format!("{}@school.edu", name.to_lowercase()),
            password_hash: "hash".to_string(),
            full_name: name.to_string(),
            role: Role::Teacher,
            created_at: now_timestamp(),
            bio: None,
            profile_image: None,
        }
    }

    #[test]
    fn test_course_filters() {
        let store = store();
        store.insert_course(&course("c1", "Math", Difficulty::Beginner, "t1")).unwrap();
        store.insert_course(&course("c2", "Math", Difficulty::Advanced, "t1")).unwrap();
        store.insert_course(&course("c3", "Art", Difficulty::Beginner, "t2")).unwrap();

        assert_eq!(store.list_courses(&CourseFilter::default()).unwrap().len(), 3);

        let math = store
            .list_courses(&CourseFilter {
                subject: Some("Math".into()),
                difficulty: None,
            })
            .unwrap();
        assert_eq!(math.len(), 2);

        let beginner_math = store
            .list_courses(&CourseFilter {
                subject: Some("Math".into()),
                difficulty: Some(Difficulty::Beginner),
            })
            .unwrap();
        assert_eq!(beginner_math.len(), 1);
        assert_eq!(beginner_math[0].id, "c1");

        assert_eq!(store.courses_by_teacher("t1", 20).unwrap().len(), 2);
    }

    #[test]
    fn test_enroll_is_idempotent() {
        let store = store();
        store.insert_course(&course("c1", "Math", Difficulty::Beginner, "t1")).unwrap();

        let first = store.enroll("c1", "s1").unwrap().unwrap();
        let second = store.enroll("c1", "s1").unwrap().unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(first.course_title, "Course c1");

        let course = store.get_course("c1").unwrap().unwrap();
        assert_eq!(course.enrolled_students, vec!["s1".to_string()]);
        assert_eq!(store.progress_for_student("s1").unwrap().len(), 1);
        assert_eq!(store.courses_enrolled("s1", 10).unwrap().len(), 1);
        assert!(store.courses_enrolled("s2", 10).unwrap().is_empty());
    }

    #[test]
    fn test_enroll_unknown_course() {
        let store = store();
        assert!(store.enroll("missing", "s1").unwrap().is_none());
        assert!(store.progress_for_student("s1").unwrap().is_empty());
    }

    #[test]
    fn test_update_progress() {
        let store = store();
        store.insert_course(&course("c1", "Math", Difficulty::Beginner, "t1")).unwrap();
        let progress = store.enroll("c1", "s1").unwrap().unwrap();

        let updated = store.update_progress(&progress.id, 55.0, 2.5).unwrap().unwrap();
        assert_eq!(updated.completion_percentage, 55.0);
        assert_eq!(updated.time_spent_hours, 2.5);

        let reloaded = store.get_progress(&progress.id).unwrap().unwrap();
        assert_eq!(reloaded, updated);
        assert!(store.update_progress("missing", 1.0, 1.0).unwrap().is_none());

        let by_course = store.progress_for_courses(&["c1".to_string()]).unwrap();
        assert_eq!(by_course.len(), 1);
        assert!(store.progress_for_courses(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_teacher_profiles() {
        let store = store();
        let account = teacher_account("Tess");

        let created = store.create_teacher_profile(&account).unwrap();
        let again = store.create_teacher_profile(&account).unwrap();
        assert_eq!(created.id, again.id);
        assert!(created.subjects.is_empty());

        let updated = store
            .update_teacher_profile(
                &account.id.to_string(),
                TeacherProfileUpdate {
                    subjects: vec!["Physics".into(), "Math".into()],
                    experience_years: 7,
                    bio: Some("Loves labs".into()),
                    hourly_rate: Some(60.0),
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.experience_years, 7);

        assert_eq!(store.list_teachers(Some("Physics")).unwrap().len(), 1);
        assert!(store.list_teachers(Some("History")).unwrap().is_empty());
        assert_eq!(store.list_teachers(None).unwrap().len(), 1);

        let missing = store
            .update_teacher_profile(
                "nobody",
                TeacherProfileUpdate {
                    subjects: vec![],
                    experience_years: 1,
                    bio: None,
                    hourly_rate: None,
                },
            )
            .unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_quiz_generated_once_and_scores_recorded() {
        let store = store();
        store.insert_course(&course("c1", "Math", Difficulty::Beginner, "t1")).unwrap();
        store.enroll("c1", "s1").unwrap();

        let make = || Quiz {
            id: Uuid::new_v4().to_string(),
            course_id: "c1".to_string(),
            title: "Course Assessment".to_string(),
            questions: vec![QuizQuestion {
                id: "q1".into(),
                question: "1 + 1?".into(),
                options: vec!["1".into(), "2".into()],
                correct_answer: 1,
                explanation: None,
            }],
            created_at: now_timestamp(),
        };
        let first = store.get_or_create_quiz("c1", make).unwrap();
        let second = store.get_or_create_quiz("c1", make).unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(store.get_quiz(&first.id).unwrap().unwrap(), first);

        let submission = QuizSubmission {
            id: Uuid::new_v4().to_string(),
            quiz_id: first.id.clone(),
            student_id: "s1".to_string(),
            answers: vec![1],
            score: 100.0,
            completed_at: now_timestamp(),
        };
        store.record_submission(&first, &submission).unwrap();

        assert_eq!(store.submissions_for_student("s1").unwrap().len(), 1);
        let progress = store.progress_for_student("s1").unwrap();
        assert_eq!(progress[0].quiz_scores, vec![100.0]);
    }

    #[test]
    fn test_posts_newest_first_with_category_filter() {
        let store = store();
        store
            .insert_post(&post("old", PostCategory::Question, "2025-01-01T00:00:00.000000Z"))
            .unwrap();
        store
            .insert_post(&post("new", PostCategory::Discussion, "2025-02-01T00:00:00.000000Z"))
            .unwrap();

        let all = store.list_posts(&PostFilter::default(), 50).unwrap();
        let ids: Vec<_> = all.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old"]);

        let questions = store
            .list_posts(
                &PostFilter {
                    category: Some(PostCategory::Question),
                },
                50,
            )
            .unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].id, "old");

        assert_eq!(store.list_posts(&PostFilter::default(), 1).unwrap().len(), 1);
    }

    #[test]
    fn test_replace_catalog_clears_previous_rows() {
        let store = store();
        store.insert_course(&course("stale", "Math", Difficulty::Beginner, "t1")).unwrap();

        store
            .replace_catalog(
                &[course("fresh", "Art", Difficulty::Beginner, "t2")],
                &[],
                &[post("p", PostCategory::Announcement, "2025-01-01T00:00:00.000000Z")],
            )
            .unwrap();

        let courses = store.list_courses(&CourseFilter::default()).unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].id, "fresh");
        assert_eq!(store.list_posts(&PostFilter::default(), 10).unwrap().len(), 1);
    }

    #[test]
    fn test_replace_catalog_keeps_registered_teachers() {
        let store = store();
        let account = teacher_account("Tess");
        store.create_teacher_profile(&account).unwrap();

        let mut sample = store.create_teacher_profile(&teacher_account("Sam")).unwrap();
        sample.id = "teacher_1".to_string();
        sample.user_id = "teacher_1".to_string();

        // Seeding twice replaces the sample profile instead of duplicating it
        store.replace_catalog(&[], &[sample.clone()], &[]).unwrap();
        store.replace_catalog(&[], &[sample], &[]).unwrap();

        let teachers = store.list_teachers(None).unwrap();
        let user_ids: Vec<&str> = teachers.iter().map(|t| t.user_id.as_str()).collect();
        assert_eq!(teachers.len(), 3);
        assert!(user_ids.contains(&"teacher_1"));
        assert!(user_ids.contains(&account.id.to_string().as_str()));
    }
}
