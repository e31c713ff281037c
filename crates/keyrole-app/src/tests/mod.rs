mod input_tests;
