mod lifecycle;
mod reads;
mod suite;
