//! Subscript get/set, negative indices, and the built-in list/dict/string
//! methods.

use test_utils::{assert_fails, assert_prints};

#[test]
fn negative_list_index_counts_from_the_end() {
    assert_prints("a = [1,2,3]\nprint(a[-1])\n", "3\n");
}

#[test]
fn list_index_assignment_mutates_in_place() {
    assert_prints("a = [1,2,3]\na[1] = 99\nprint(a)\n", "[1, 99, 3]\n");
}

#[test]
fn out_of_range_list_index_is_a_runtime_error() {
    let err = assert_fails("a = [1,2,3]\nprint(a[5])\n");
    assert_eq!(err.line(), 2);
}

#[test]
fn dict_subscript_assignment_upserts_a_key() {
    let src = "d = {'a': 1}\nd['a'] = 2\nd['b'] = 3\nprint(d)\n";
    assert_prints(src, "{a: 2, b: 3}\n");
}

#[test]
fn missing_dict_key_is_a_runtime_error() {
    let err = assert_fails("d = {}\nprint(d['missing'])\n");
    assert_eq!(err.line(), 2);
}

#[test]
fn list_append_pop_and_len() {
    let src = "a = [1,2]\na.append(3)\nprint(a.len())\nprint(a.pop())\nprint(a)\n";
    assert_prints(src, "3\n3\n[1, 2]\n");
}

#[test]
fn dict_keys_values_and_get_with_default() {
    let src = concat!(
        "d = {'a': 1, 'b': 2}\n",
        "print(d.keys())\n",
        "print(d.values())\n",
        "print(d.get('a', 0))\n",
        "print(d.get('z', 0))\n",
    );
    assert_prints(src, "[a, b]\n[1, 2]\n1\n0\n");
}

#[test]
fn string_upper_lower_and_len() {
    let src = "s = 'Hi'\nprint(s.upper())\nprint(s.lower())\nprint(s.len())\n";
    assert_prints(src, "HI\nhi\n2\n");
}

#[test]
fn aug_assign_evaluates_the_subscripted_object_exactly_once() {
    let src = concat!(
        "calls = []\n",
        "shared = [5]\n",
        "def get_list():\n",
        "    calls.append(1)\n",
        "    return shared\n",
        "get_list()[0] += 1\n",
        "print(shared)\n",
        "print(calls.len())\n",
    );
    assert_prints(src, "[6]\n1\n");
}

#[test]
fn string_repeat_and_list_repeat() {
    assert_prints("print('ab' * 3)\n", "ababab\n");
    assert_prints("print([1, 2] * 2)\n", "[1, 2, 1, 2]\n");
}

#[test]
fn list_concatenation_builds_a_new_list() {
    assert_prints("print([1] + [2, 3])\n", "[1, 2, 3]\n");
}
