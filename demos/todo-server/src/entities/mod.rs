pub mod todo_item;
