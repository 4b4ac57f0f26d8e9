pub mod login;
pub mod rooms;
pub mod sign_up;

pub use login::{LoginError, LoginOutput, LoginService};
pub use rooms::{CreateRoomError, CreateRoomInput, ListRoomsError, RoomService};
pub use sign_up::{SignUpError, SignUpInput, SignUpService};
