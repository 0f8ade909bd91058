pub mod itinerary;
pub mod map;
pub mod trip;
