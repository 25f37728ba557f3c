use skincart_core::{RoutineId, SkinType};

use crate::dto::{NewRoutine, Routine, RoutineQuery};
use crate::error::ClientError;
use crate::http::{ApiClient, segment};

impl ApiClient {
    /// Routines recommended for a skin type.
    pub async fn routines_for(&self, skin_type: SkinType) -> Result<Vec<Routine>, ClientError> {
        self.get_json_query("/routines", &RoutineQuery { skin_type }).await
    }

    pub async fn get_routine(&self, id: &RoutineId) -> Result<Routine, ClientError> {
        self.get_json(&format!("/routines/{}", segment(id.as_str()))).await
    }

    pub async fn create_routine(&self, routine: &NewRoutine) -> Result<Routine, ClientError> {
        self.post_json("/routines", routine).await
    }

    pub async fn delete_routine(&self, id: &RoutineId) -> Result<(), ClientError> {
        self.delete(&format!("/routines/{}", segment(id.as_str()))).await
    }
}
