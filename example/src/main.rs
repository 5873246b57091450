use scope_exit::{make_checked, ExitGuard, FailGuard, SuccessGuard, UniqueResource};
use std::cell::RefCell;

fn transfer(journal: &RefCell<Vec<String>>, amount: i64) -> Result<i64, String> {
    let _exit = ExitGuard::new(|| journal.borrow_mut().push("unlock".to_string()));
    let commit = SuccessGuard::new(|| journal.borrow_mut().push("commit".to_string()));
    let rollback = FailGuard::new(|| journal.borrow_mut().push("rollback".to_string()));
    let result = if amount < 0 {
        Err(format!("negative amount {}", amount))
    } else {
        Ok(amount)
    };
    rollback.finish(commit.finish(result))
}

fn main() {
    let buffer = make_checked(
        Box::into_raw(Box::new([0u8; 16])),
        &std::ptr::null_mut(),
        |p: &*mut [u8; 16]| {
            // SAFETY: the pointer came from `Box::into_raw` and is freed once.
            drop(unsafe { Box::from_raw(*p) });
            println!("freed buffer");
        },
    );
    println!("buffer allocated: {}", !buffer.get().is_null());

    let sock = UniqueResource::new(7, |fd: &i32| println!("close({})", fd));
    println!("socket = {:?}", sock);

    let journal = RefCell::new(Vec::new());
    println!("transfer = {:?}", transfer(&journal, 10));
    println!("transfer = {:?}", transfer(&journal, -1));
    println!("journal = {:?}", journal.borrow());
}
