mod remote_auth_middleware;

pub use remote_auth_middleware::{RemoteAuthState, remote_auth};
