use crate::session::Session;

#[derive(Clone)]
pub struct AppState {
    pub session: Session,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}
