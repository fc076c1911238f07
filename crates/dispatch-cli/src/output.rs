//! Plain text output.

use dispatch_server::domain::UserView;

const RULE_WIDTH: usize = 80;

pub fn format_user(user: &UserView) -> String {
    format!(
        "ID:      {}\nName:    {}\nEmail:   {}\nPhone:   {}\nRole:    {}\nActive:  {}\nCreated: {}",
        user.id,
        user.name,
        user.email,
        user.phone.as_deref().unwrap_or("N/A"),
        user.role,
        user.is_active,
        user.created_at.to_rfc3339(),
    )
}

pub fn print_user(user: &UserView) {
    println!("{}", format_user(user));
}

pub fn print_user_list(users: &[UserView]) {
    let rule = "=".repeat(RULE_WIDTH);
    println!("{rule}\nTotal Users: {}\n{rule}", users.len());

    if users.is_empty() {
        println!("No users found in database.");
        return;
    }

    for user in users {
        println!("{}", format_user(user));
        println!("{}", "-".repeat(RULE_WIDTH));
    }
}
