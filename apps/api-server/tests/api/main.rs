mod accounts;
mod blogs;
mod comments;
mod health;
mod helpers;
mod share;
mod tags;
