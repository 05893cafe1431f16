//! Interactive console harness over the tree operations.
//!
//! This is a demo driver, not part of the library contract: it reads menu
//! choices and values from stdin, forwards them to the tree and prints the
//! results.

use std::io::{self, BufRead};

use avl::AvlTree;

fn read_value(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    prompt: &str,
) -> io::Result<Option<f64>> {
    println!("{}", prompt);

    let line = match lines.next() {
        Some(line) => line?,
        None => return Ok(None),
    };

    match line.trim().parse() {
        Ok(value) => Ok(Some(value)),
        Err(_) => {
            println!("Incorrect choice");
            Ok(None)
        },
    }
}

fn main() -> io::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let mut tree = AvlTree::new();
    for value in 1..=11 {
        tree.insert(value as f64);
    }

    println!("An ASCII representation of the tree is:");
    println!("{}", tree.display());

    loop {
        println!("1.  Insert");
        println!("2.  Delete");
        println!("3.  Search for value");
        println!("4.  Search for smallest value");
        println!("5.  Search for largest value");
        println!("6.  Print tree inorder");
        println!("7.  Print tree");
        println!("8.  Clear tree");
        println!("0.  Exit");

        let choice = match lines.next() {
            Some(line) => line?,
            None => break,
        };

        match choice.trim() {
            "0" => {
                println!("Exit");
                break;
            },

            "1" => {
                if let Some(value) = read_value(&mut lines, "Input value: ")? {
                    if !tree.insert(value) {
                        println!("Value already in tree");
                    }
                }
            },

            "2" => {
                if let Some(value) = read_value(&mut lines, "Value to remove: ")? {
                    if !tree.remove(value) {
                        println!("Value does not exist, try again.");
                    }
                }
            },

            "3" => {
                if let Some(value) = read_value(&mut lines, "Value to find: ")? {
                    if tree.contains(value) {
                        println!("Value {} found in the tree", value);
                    } else {
                        println!("Value {} not found in the tree", value);
                    }
                }
            },

            "4" => match tree.min() {
                Ok(value) => println!("The smallest value in the tree is {}", value),
                Err(_) => println!("Tree is empty!"),
            },

            "5" => match tree.max() {
                Ok(value) => println!("The largest value in the tree is {}", value),
                Err(_) => println!("Tree is empty!"),
            },

            "6" => {
                if tree.is_empty() {
                    println!("Tree is empty!");
                } else {
                    println!("The inorder print of the tree is:");
                    for value in tree.iter_inorder() {
                        println!("{}", value);
                    }
                    println!();
                }
            },

            "7" => {
                if tree.is_empty() {
                    println!("Tree is empty!");
                } else {
                    println!("The print of the tree is:");
                    println!("{}", tree.display());
                }
            },

            "8" => {
                tree.clear();
                println!("Tree has been reset!");
            },

            _ => println!("Incorrect choice"),
        }
    }

    Ok(())
}
