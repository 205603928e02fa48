pub mod column;
pub mod plan;
pub mod program;
pub mod session;
pub mod site;
pub mod user_record;
