mod health_check;
mod proxy;
mod static_assets;

pub use health_check::health_check;
pub use proxy::proxy_subscribe;
pub use proxy::PropagateStatus;
pub use proxy::RelayError;
pub use static_assets::static_assets;
