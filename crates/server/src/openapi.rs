use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use service::auth::domain::{AuthSession, AuthUser, LoginInput};
use service::categories::{CategoryPatch, NewCategory};
use service::clients::{ClientPatch, NewClient};
use service::experiences::{ExperiencePatch, NewExperience};
use service::hero_slides::{HeroSlidePatch, NewHeroSlide};
use service::messages::{MessagePatch, NewMessage};
use service::ordering::{ReorderInput, ReorderItem};
use service::projects::{NewProject, ProjectPatch};
use service::services::{NewService, ServicePatch};
use service::skills::{NewSkill, SkillPatch};

use crate::routes;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health,
        routes::auth::login,
        routes::auth::me,
        routes::categories::list,
        routes::categories::get_one,
        routes::categories::create,
        routes::categories::update,
        routes::categories::remove,
        routes::categories::reorder,
        routes::clients::list,
        routes::clients::get_one,
        routes::clients::create,
        routes::clients::update,
        routes::clients::remove,
        routes::clients::reorder,
        routes::hero_slides::list,
        routes::hero_slides::get_one,
        routes::hero_slides::create,
        routes::hero_slides::update,
        routes::hero_slides::remove,
        routes::hero_slides::reorder,
        routes::projects::list,
        routes::projects::get_one,
        routes::projects::get_by_slug,
        routes::projects::create,
        routes::projects::update,
        routes::projects::remove,
        routes::projects::reorder,
        routes::services::list,
        routes::services::get_one,
        routes::services::create,
        routes::services::update,
        routes::services::remove,
        routes::services::reorder,
        routes::skills::list,
        routes::skills::get_one,
        routes::skills::create,
        routes::skills::update,
        routes::skills::remove,
        routes::skills::reorder,
        routes::experiences::list,
        routes::experiences::get_one,
        routes::experiences::create,
        routes::experiences::update,
        routes::experiences::remove,
        routes::messages::submit,
        routes::messages::list,
        routes::messages::get_one,
        routes::messages::mark,
        routes::messages::remove,
        routes::settings::get_all,
        routes::settings::put_all,
    ),
    components(
        schemas(
            LoginInput,
            AuthUser,
            AuthSession,
            ReorderInput,
            ReorderItem,
            NewCategory,
            CategoryPatch,
            NewClient,
            ClientPatch,
            NewHeroSlide,
            HeroSlidePatch,
            NewProject,
            ProjectPatch,
            NewService,
            ServicePatch,
            NewSkill,
            SkillPatch,
            NewExperience,
            ExperiencePatch,
            NewMessage,
            MessagePatch,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "categories"),
        (name = "clients"),
        (name = "hero-slides"),
        (name = "projects"),
        (name = "services"),
        (name = "skills"),
        (name = "experiences"),
        (name = "messages"),
        (name = "settings")
    )
)]
pub struct ApiDoc;
