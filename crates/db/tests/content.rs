//! Integration tests for skills, experience, testimonials, services, and
//! achievements.

use chrono::NaiveDate;
use folio_core::content::SkillCategory;
use folio_db::models::experience::{CreateExperience, UpdateExperience};
use folio_db::models::project::CreateProject;
use folio_db::models::service::CreateService;
use folio_db::models::skill::CreateSkill;
use folio_db::models::testimonial::CreateTestimonial;
use folio_db::repositories::{
    ExperienceRepo, ProjectRepo, ServiceRepo, SkillRepo, TestimonialRepo,
};
use sqlx::PgPool;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_skill(name: &str, category: SkillCategory, sort_order: i32) -> CreateSkill {
    CreateSkill {
        name: name.to_string(),
        category,
        proficiency: 80,
        icon_class: None,
        icon_image: None,
        description: None,
        years_experience: None,
        sort_order: Some(sort_order),
        is_active: None,
        featured: None,
    }
}

fn new_testimonial(author: &str, project_id: Option<i64>) -> CreateTestimonial {
    CreateTestimonial {
        author: author.to_string(),
        role: None,
        company: None,
        body: "Great work".into(),
        rating: None,
        image: None,
        project_id,
        featured: None,
        is_approved: None,
        sort_order: None,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_skills_grouped_by_category_then_order(pool: PgPool) {
    SkillRepo::create(&pool, &new_skill("SQL", SkillCategory::Database, 0)).await.unwrap();
    SkillRepo::create(&pool, &new_skill("Rust", SkillCategory::Backend, 2)).await.unwrap();
    SkillRepo::create(&pool, &new_skill("Go", SkillCategory::Backend, 1)).await.unwrap();

    let names: Vec<String> = SkillRepo::list_active(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, vec!["Go", "Rust", "SQL"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_proficiency_out_of_range_is_rejected(pool: PgPool) {
    let mut input = new_skill("Overconfident", SkillCategory::Other, 0);
    input.proficiency = 101;
    let err = SkillRepo::create(&pool, &input).await.unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23514"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_experience_current_first_and_clear_end_date(pool: PgPool) {
    let past = ExperienceRepo::create(
        &pool,
        &CreateExperience {
            title: "Engineer".into(),
            company: "Old Co".into(),
            company_url: None,
            location: None,
            employment_type: None,
            start_date: date(2018, 1, 1),
            end_date: Some(date(2020, 1, 1)),
            description: None,
            achievements: Some(vec!["Shipped v1".into(), "Hired team".into()]),
            technologies: None,
            sort_order: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(past.achievements, vec!["Shipped v1", "Hired team"]);

    let current = ExperienceRepo::create(
        &pool,
        &CreateExperience {
            title: "Lead".into(),
            company: "New Co".into(),
            company_url: None,
            location: None,
            employment_type: None,
            start_date: date(2016, 1, 1),
            end_date: None,
            description: None,
            achievements: None,
            technologies: None,
            sort_order: None,
        },
    )
    .await
    .unwrap();

    let listed = ExperienceRepo::list(&pool).await.unwrap();
    assert_eq!(listed[0].id, current.id);

    let reopened = ExperienceRepo::update(
        &pool,
        past.id,
        &UpdateExperience {
            clear_end_date: true,
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert!(reopened.end_date.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deleting_project_detaches_testimonials(pool: PgPool) {
    let project = ProjectRepo::create(
        &pool,
        "client-site",
        &CreateProject {
            title: "Client Site".into(),
            slug: None,
            category: None,
            summary: None,
            description: None,
            tags: None,
            status: None,
            repo_url: None,
            demo_url: None,
            image: None,
            featured: None,
            sort_order: None,
        },
    )
    .await
    .unwrap();
    let t = TestimonialRepo::create(&pool, &new_testimonial("Ann", Some(project.id)))
        .await
        .unwrap();

    ProjectRepo::delete(&pool, project.id).await.unwrap();

    let after = TestimonialRepo::find_by_id(&pool, t.id).await.unwrap().unwrap();
    assert_eq!(after.project_id, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unapproved_testimonials_are_hidden(pool: PgPool) {
    TestimonialRepo::create(&pool, &new_testimonial("Ann", None)).await.unwrap();
    TestimonialRepo::create(
        &pool,
        &CreateTestimonial {
            is_approved: Some(false),
            ..new_testimonial("Spam", None)
        },
    )
    .await
    .unwrap();

    assert_eq!(TestimonialRepo::list_approved(&pool).await.unwrap().len(), 1);
    assert_eq!(TestimonialRepo::list_all(&pool).await.unwrap().len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_service_search_skips_inactive(pool: PgPool) {
    let base = CreateService {
        title: "API Development".into(),
        slug: None,
        short_description: None,
        description: None,
        icon: None,
        image: None,
        starting_price_cents: Some(150_000),
        deliverables: Some(vec!["Design".into(), "Build".into()]),
        sort_order: None,
        is_active: None,
        featured: None,
    };
    ServiceRepo::create(&pool, "api-development", &base).await.unwrap();
    ServiceRepo::create(
        &pool,
        "api-audit",
        &CreateService {
            title: "API Audit".into(),
            is_active: Some(false),
            ..base.clone()
        },
    )
    .await
    .unwrap();

    let found = ServiceRepo::search(&pool, "api", 5).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].starting_price_cents, Some(150_000));
    assert_eq!(ServiceRepo::list_active(&pool).await.unwrap().len(), 1);
}
