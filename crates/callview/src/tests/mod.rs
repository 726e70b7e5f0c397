mod config;
mod property_tokens;
