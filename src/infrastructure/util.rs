use crate::application::ports::util::IdGenerator;
use uuid::Uuid;

const TOKEN_LEN: usize = 12;

#[derive(Default, Clone)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_token(&self) -> String {
        let mut token = Uuid::new_v4().simple().to_string();
        token.truncate(TOKEN_LEN);
        token
    }
}
