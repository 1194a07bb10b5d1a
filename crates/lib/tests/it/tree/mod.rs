mod node;
mod path;
