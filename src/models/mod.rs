pub mod author;
pub mod book;
pub mod cart;
pub mod review;
pub mod topic;
pub mod user;
pub mod wish_list;

pub use author::*;
pub use book::*;
pub use cart::*;
pub use review::*;
pub use topic::*;
pub use user::*;
pub use wish_list::*;
