use uuid::Uuid;

use super::candidate_service::CandidateService;
use crate::dto::position_dto::{CreatePositionPayload, PositionListQuery, UpdatePositionPayload};
use crate::error::{Error, Result};
use crate::models::{
    position::{Position, PositionFilter, PositionStatus},
    user::{Role, User, MANAGERS},
};
use crate::repository::DynStore;
use crate::utils::time::now;

#[derive(Clone)]
pub struct PositionService {
    store: DynStore,
    candidates: CandidateService,
}

impl PositionService {
    pub fn new(store: DynStore, candidates: CandidateService) -> Self {
        Self { store, candidates }
    }

    pub async fn create(&self, actor: &User, payload: CreatePositionPayload) -> Result<Position> {
        if !MANAGERS.contains(&actor.role) {
            return Err(Error::Forbidden(
                "Only hiring managers, employers and admins can create positions".to_string(),
            ));
        }
        let hiring_manager = match payload.hiring_manager {
            Some(id) if id != actor.id => self.manager(id).await?.id,
            _ => actor.id,
        };

        let ts = now();
        let position = Position {
            id: Uuid::new_v4(),
            title: payload.title.trim().to_string(),
            department: payload.department,
            required_skills: payload.required_skills,
            location: payload.location,
            openings: payload.openings.unwrap_or(1),
            status: PositionStatus::Open,
            hiring_manager,
            created_by: actor.id,
            created_at: ts,
            updated_at: ts,
        };
        self.store.insert_position(&position).await?;
        tracing::info!(position_id = %position.id, title = %position.title, "position created");
        Ok(position)
    }

    pub async fn list(&self, query: PositionListQuery) -> Result<Vec<Position>> {
        self.store
            .list_positions(PositionFilter {
                status: query.status,
                hiring_manager: query.hiring_manager,
            })
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<Position> {
        self.store
            .position_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound("Position not found".to_string()))
    }

    pub async fn update(
        &self,
        actor: &User,
        id: Uuid,
        payload: UpdatePositionPayload,
    ) -> Result<Position> {
        let mut position = self.get(id).await?;
        ensure_can_manage(actor, &position)?;

        let old_title = position.title.clone();
        if let Some(v) = payload.title {
            position.title = v.trim().to_string();
        }
        if let Some(v) = payload.department {
            position.department = Some(v);
        }
        if let Some(v) = payload.required_skills {
            position.required_skills = v;
        }
        if let Some(v) = payload.location {
            position.location = Some(v);
        }
        if let Some(v) = payload.openings {
            position.openings = v;
        }
        if let Some(v) = payload.status {
            position.status = v;
        }
        if let Some(v) = payload.hiring_manager {
            position.hiring_manager = self.manager(v).await?.id;
        }
        position.updated_at = now();
        self.store.update_position(&position).await?;

        if position.title != old_title {
            self.candidates.rename_position(position.id, &position.title).await;
        }
        Ok(position)
    }

    pub async fn close(&self, actor: &User, id: Uuid) -> Result<Position> {
        let mut position = self.get(id).await?;
        ensure_can_manage(actor, &position)?;
        if position.status != PositionStatus::Closed {
            position.status = PositionStatus::Closed;
            position.updated_at = now();
            self.store.update_position(&position).await?;
            tracing::info!(position_id = %id, closed_by = %actor.id, "position closed");
        }
        Ok(position)
    }

    pub async fn delete(&self, actor: &User, id: Uuid) -> Result<()> {
        let position = self.get(id).await?;
        ensure_can_manage(actor, &position)?;
        self.store.delete_position(id).await?;
        tracing::info!(position_id = %id, deleted_by = %actor.id, "position deleted");
        Ok(())
    }

    async fn manager(&self, id: Uuid) -> Result<User> {
        let user = self
            .store
            .user_by_id(id)
            .await?
            .ok_or_else(|| Error::BadRequest("Hiring manager does not exist".to_string()))?;
        if !MANAGERS.contains(&user.role) {
            return Err(Error::BadRequest(
                "Hiring manager must be a hiring manager, employer or admin".to_string(),
            ));
        }
        Ok(user)
    }
}

fn ensure_can_manage(actor: &User, position: &Position) -> Result<()> {
    if actor.role == Role::Admin || (MANAGERS.contains(&actor.role) && position.is_owned_by(actor.id)) {
        Ok(())
    } else {
        Err(Error::Forbidden(
            "Only the position owner or an admin can change it".to_string(),
        ))
    }
}
