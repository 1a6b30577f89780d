mod subscriber_email;
mod subscription_request;
// allow external `use` statements to skip `subscriber_email` etc
pub use subscriber_email::SubscriberEmail;
pub use subscription_request::SubscriptionRequest;
